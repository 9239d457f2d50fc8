use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::TenantRecord;
use super::warnings::AnalysisWarning;

/// Per-tenant priority outcome against the reference baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantStatus {
    pub name: String,
    pub occupied_part: String,
    pub has_priority: bool,
    pub deposit_at_risk: bool,
    pub deposit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenancyResolution {
    pub tenants: Vec<TenantStatus>,
    /// Sum of deposits the buyer would have to repay.
    pub exposure: u64,
    pub warnings: Vec<AnalysisWarning>,
}

impl TenancyResolution {
    pub fn at_risk(&self) -> impl Iterator<Item = &TenantStatus> {
        self.tenants
            .iter()
            .filter(|tenant| tenant.has_priority && tenant.deposit_at_risk)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TenancyPriorityResolver;

impl TenancyPriorityResolver {
    pub fn resolve(
        &self,
        tenants: &[TenantRecord],
        reference_date: Option<NaiveDate>,
    ) -> TenancyResolution {
        let mut warnings = Vec::new();

        let Some(reference_date) = reference_date else {
            if !tenants.is_empty() {
                warnings.push(AnalysisWarning::TenancyUnassessed {
                    tenants: tenants.len(),
                });
            }
            return TenancyResolution {
                tenants: tenants
                    .iter()
                    .map(|tenant| status(tenant, false))
                    .collect(),
                exposure: 0,
                warnings,
            };
        };

        let statuses: Vec<TenantStatus> = tenants
            .iter()
            .map(|tenant| match (tenant.move_in_date, tenant.fixed_date) {
                (Some(move_in), Some(fixed)) => {
                    status(tenant, move_in < reference_date && fixed < reference_date)
                }
                _ => {
                    warnings.push(AnalysisWarning::MissingTenancyDate {
                        tenant: tenant.name.clone(),
                    });
                    status(tenant, false)
                }
            })
            .collect();

        let exposure = statuses
            .iter()
            .filter(|tenant| tenant.deposit_at_risk)
            .fold(0u64, |total, tenant| total.saturating_add(tenant.deposit));

        debug!(
            %reference_date,
            tenants = statuses.len(),
            exposure,
            "tenancy priority resolved"
        );

        TenancyResolution {
            tenants: statuses,
            exposure,
            warnings,
        }
    }
}

fn status(tenant: &TenantRecord, has_priority: bool) -> TenantStatus {
    TenantStatus {
        name: tenant.name.clone(),
        occupied_part: tenant.occupied_part.clone(),
        has_priority,
        deposit_at_risk: has_priority && !tenant.has_bid_request,
        deposit: tenant.deposit,
    }
}
