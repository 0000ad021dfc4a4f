//! Engine configuration and the simplify-then-assemble pipeline.

use log::debug;
use sfera_basis::Basis;
use sfera_opmat::{AssemblyConfig, OpMat};
use sfera_terms::{NormalTerms, Simplifier, SimplifierConfig, TermSum};

use crate::error::Result;

/// Configuration of the whole pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    /// Simplification settings.
    pub simplifier: SimplifierConfig,
    /// Matrix assembly settings.
    pub assembly: AssemblyConfig,
}

impl EngineConfig {
    /// Sets the simplifier configuration.
    #[must_use]
    pub fn with_simplifier(mut self, simplifier: SimplifierConfig) -> Self {
        self.simplifier = simplifier;
        self
    }

    /// Sets the assembly configuration.
    #[must_use]
    pub fn with_assembly(mut self, assembly: AssemblyConfig) -> Self {
        self.assembly = assembly;
        self
    }

    /// Sets the negligibility threshold of both stages.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.simplifier.threshold = threshold;
        self.assembly.threshold = threshold;
        self
    }
}

/// Runs simplification and assembly under one configuration.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    simplifier: Simplifier,
}

impl Engine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            simplifier: Simplifier::with_config(config.simplifier.clone()),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the simplifier.
    #[must_use]
    pub fn simplifier(&self) -> &Simplifier {
        &self.simplifier
    }

    /// Simplifies a sum.
    ///
    /// # Errors
    ///
    /// Propagates simplification errors.
    pub fn simplify(&self, sum: &TermSum) -> Result<NormalTerms> {
        Ok(self.simplifier.simplify(sum)?)
    }

    /// Assembles already simplified terms.
    ///
    /// # Errors
    ///
    /// Propagates assembly errors.
    pub fn assemble(&self, bra: &Basis, ket: &Basis, terms: &NormalTerms) -> Result<OpMat> {
        Ok(OpMat::assemble(bra, ket, terms, &self.config.assembly)?)
    }

    /// Simplifies `sum` and assembles its matrix within one basis.
    ///
    /// # Errors
    ///
    /// Propagates simplification and assembly errors.
    pub fn operator(&self, basis: &Basis, sum: &TermSum) -> Result<OpMat> {
        let terms = self.simplify(sum)?;
        let mat = self.assemble(basis, basis, &terms)?;
        debug!(
            "operator: {} raw terms -> {} canonical -> {} entries",
            sum.len(),
            terms.len(),
            mat.nnz()
        );
        Ok(mat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfera_basis::{Confs, Conserved};
    use sfera_terms::Term;

    #[test]
    fn test_with_threshold_sets_both_stages() {
        let config = EngineConfig::default().with_threshold(1e-9);
        assert_eq!(config.simplifier.threshold, 1e-9);
        assert_eq!(config.assembly.threshold, 1e-9);
    }

    #[test]
    fn test_operator_pipeline() {
        let engine = Engine::with_config(
            EngineConfig::default().with_assembly(AssemblyConfig::default().with_num_threads(1)),
        );
        let basis = Basis::trivial(Confs::new(3, vec![Conserved::new(vec![1; 3], 1)]).unwrap());
        let n: TermSum = (0..3).map(Term::density).collect();
        let m = engine.operator(&basis, &n).unwrap();
        assert_eq!(m.nnz(), 3);
        assert!((0..3).all(|i| m.get(i, i).re == 1.0));
    }

    #[test]
    fn test_errors_are_wrapped() {
        let engine = Engine::new();
        let basis = Basis::trivial(Confs::new(2, Vec::new()).unwrap());
        let far = TermSum::from(Term::density(4));
        assert!(matches!(
            engine.operator(&basis, &far),
            Err(crate::Error::OpMat(_))
        ));
    }
}
