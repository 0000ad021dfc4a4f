//! End-to-end scenarios on small fuzzy-sphere shells.

use sfera::prelude::*;

fn close(a: Complex64, b: f64) -> bool {
    (a - b).norm() < 1e-10
}

/// Two flavors at half filling in the `L_z = 0` sector.
fn half_filled(nm: usize) -> Confs {
    let nf = 2;
    #[allow(clippy::cast_possible_wrap)]
    let ne = nm as i64;
    Confs::new(
        nm * nf,
        vec![
            particle_number(nm, nf, ne).unwrap(),
            twice_lz(nm, nf, 0).unwrap(),
        ],
    )
    .unwrap()
}

#[test]
fn hamiltonian_commutes_with_observables() {
    let (nm, nf) = (3, 2);
    let engine = Engine::new();
    let s = engine.simplifier();
    let h = density_interaction_terms(nm, nf, &[1.0, 0.3], None, None).unwrap();
    let l2 = l2_terms(nm, nf).unwrap();
    let c2 = spn_c2_terms(nm, nf).unwrap();

    for obs in [&l2, &c2] {
        let comm = s.commutator(&h.to_sum(), &obs.to_sum()).unwrap();
        assert!(comm.iter().all(|t| t.coeff().norm() < 1e-10));
    }
}

#[test]
fn hamiltonian_and_l2_matrices_commute() {
    let nm = 3;
    let basis = Basis::trivial(half_filled(nm));
    let engine = Engine::new();
    let h = engine
        .assemble(&basis, &basis, &density_interaction_terms(nm, 2, &[1.0, 0.7], None, None).unwrap())
        .unwrap();
    let l2 = engine.assemble(&basis, &basis, &l2_terms(nm, 2).unwrap()).unwrap();
    assert!(l2.is_hermitian(1e-12));

    for col in 0..basis.len() {
        let mut e = vec![Complex64::new(0.0, 0.0); basis.len()];
        e[col] = Complex64::new(1.0, 0.0);
        let hl = h.mul_vec(&l2.mul_vec(&e).unwrap()).unwrap();
        let lh = l2.mul_vec(&h.mul_vec(&e).unwrap()).unwrap();
        assert!(hl.iter().zip(&lh).all(|(a, b)| (a - b).norm() < 1e-10));
    }
}

#[test]
fn symmetry_sectors_split_the_hamiltonian() {
    let (nm, nf) = (4, 2);
    let confs = half_filled(nm);
    let engine = Engine::with_config(EngineConfig::default().with_assembly(
        AssemblyConfig::default().with_real_only(true),
    ));
    let h = density_interaction_terms(nm, nf, &[1.0, 0.5, 0.2], None, None).unwrap();
    let swap = flavor_permutation(nm, nf, &[1, 0]).unwrap();
    let ph = particle_hole(nm, nf, &[1, 0]).unwrap();

    let mut total = 0;
    for z in [1.0, -1.0] {
        for p in [1.0, -1.0] {
            let sectors = [
                Sector::new(swap.clone(), z).unwrap(),
                Sector::new(ph.clone(), p).unwrap(),
            ];
            let basis = Basis::new(confs.clone(), &sectors).unwrap();
            let m = engine.assemble(&basis, &basis, &h).unwrap();
            assert!(m.is_hermitian(1e-12));
            total += basis.len();
        }
    }
    assert_eq!(total, confs.len());
}

#[test]
fn single_particle_casimir_and_l2() {
    let (nm, nf) = (2, 2);
    let confs = Confs::new(nm * nf, vec![particle_number(nm, nf, 1).unwrap()]).unwrap();
    let basis = Basis::trivial(confs);
    let engine = Engine::new();
    let c2 = engine.assemble(&basis, &basis, &spn_c2_terms(nm, nf).unwrap()).unwrap();
    let l2 = engine.assemble(&basis, &basis, &l2_terms(nm, nf).unwrap()).unwrap();
    for i in 0..basis.len() {
        assert!(close(c2.get(i, i), 0.75));
        assert!(close(l2.get(i, i), 0.75));
    }
}

#[test]
fn product_state_expectation() {
    let nm = 3;
    let confs = Confs::new(nm, vec![particle_number(nm, 1, 1).unwrap()]).unwrap();
    let basis = Basis::trivial(confs);
    let engine = Engine::new();
    let lz = engine.assemble(&basis, &basis, &lz_terms(nm, 1).unwrap()).unwrap();
    for (m_index, expected) in [(0, -1.0), (1, 0.0), (2, 1.0)] {
        let state = basis.state_from_config(1 << m_index).unwrap();
        assert!(close(lz.expectation(&state, &state).unwrap(), expected));
    }
}
