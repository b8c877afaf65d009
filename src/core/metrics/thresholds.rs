use log::debug;

use super::calculator::Calculator;
use crate::types::MetricsError;

/// Points above the required minimum after which we suggest raising it
pub const MSI_INCREASE_TOLERANCE: f64 = 2.0;

/// Gates a run on minimum MSI and covered-code MSI
#[derive(Debug, Clone, Default)]
pub struct MinMsiChecker {
    pub ignore_msi_with_no_mutations: bool,
    pub min_msi: Option<f64>,
    pub min_covered_msi: Option<f64>,
}

impl MinMsiChecker {
    pub fn new(
        ignore_msi_with_no_mutations: bool,
        min_msi: Option<f64>,
        min_covered_msi: Option<f64>,
    ) -> Self {
        Self {
            ignore_msi_with_no_mutations,
            min_msi,
            min_covered_msi,
        }
    }

    /// Fails on the first threshold the calculator does not meet
    pub fn check(&self, calculator: &Calculator) -> Result<(), MetricsError> {
        if self.ignore_msi_with_no_mutations && calculator.total_mutants_count() == 0 {
            debug!("No mutants were considered; skipping minimum MSI checks");
            return Ok(());
        }

        let msi = calculator.mutation_score_indicator();
        if let Some(min) = self.min_msi
            && msi < min
        {
            return Err(MetricsError::MinMsi { msi, min });
        }

        let covered_msi = calculator.covered_code_mutation_score_indicator();
        if let Some(min) = self.min_covered_msi
            && covered_msi < min
        {
            return Err(MetricsError::MinCoveredMsi {
                msi: covered_msi,
                min,
            });
        }

        Ok(())
    }

    /// Human-readable hints for thresholds that could be tightened
    pub fn suggestions(&self, calculator: &Calculator) -> Vec<String> {
        let mut hints = Vec::new();
        let msi = calculator.mutation_score_indicator();
        if let Some(min) = self.min_msi
            && msi - min > MSI_INCREASE_TOLERANCE
        {
            hints.push(format!(
                "The MSI is {:.2}% percentage points over the required MSI. Consider increasing the required MSI percentage the next time you run mutation testing.",
                msi - min
            ));
        }
        let covered_msi = calculator.covered_code_mutation_score_indicator();
        if let Some(min) = self.min_covered_msi
            && covered_msi - min > MSI_INCREASE_TOLERANCE
        {
            hints.push(format!(
                "The Covered Code MSI is {:.2}% percentage points over the required Covered Code MSI. Consider increasing the required Covered Code MSI percentage the next time you run mutation testing.",
                covered_msi - min
            ));
        }
        hints
    }
}
