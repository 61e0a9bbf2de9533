//! Built-in industry profiles.

use std::collections::BTreeMap;

use super::industry::{FieldAliases, IndustryProfile, SectionConfig};
use crate::models::SemanticRole;

pub const RETAIL: &str = "retail";
pub const FINANCE: &str = "finance";
pub const HEALTHCARE: &str = "healthcare";
pub const MANUFACTURING: &str = "manufacturing";

/// All built-in profiles keyed by industry.
pub fn builtin_profiles() -> BTreeMap<String, IndustryProfile> {
    let mut profiles = BTreeMap::new();
    profiles.insert(RETAIL.to_string(), retail());
    profiles.insert(FINANCE.to_string(), finance());
    profiles.insert(HEALTHCARE.to_string(), healthcare());
    profiles.insert(MANUFACTURING.to_string(), manufacturing());
    profiles
}

/// Sections every industry dashboard shows; titles and hints vary.
fn standard_sections(kpi_title: &str, trend_value_key: &str) -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("kpis", SemanticRole::KpiSet).titled(kpi_title),
        SectionConfig::new("totals", SemanticRole::Totals).expanded(),
        SectionConfig::new("trends", SemanticRole::Trend)
            .titled("Trends")
            .expanded()
            .windowed()
            .with_value_key(trend_value_key),
        SectionConfig::new("highPerformers", SemanticRole::Ranking).titled("Top Performers"),
        SectionConfig::new("lowPerformers", SemanticRole::Ranking).titled("Bottom Performers"),
        SectionConfig::new("hypothesis", SemanticRole::NarrativeList).titled("Hypotheses"),
        SectionConfig::new("forecast", SemanticRole::Trend)
            .titled("Forecast")
            .expanded()
            .windowed(),
        SectionConfig::new("segments", SemanticRole::Totals).expanded(),
        SectionConfig::new("variance", SemanticRole::Generic),
    ]
}

fn retail() -> IndustryProfile {
    IndustryProfile {
        display_name: "Retail".to_string(),
        palette: palette(&["#2563eb", "#16a34a", "#f59e0b", "#dc2626", "#7c3aed", "#0891b2"]),
        fields: vec![
            FieldAliases::new("dateCol", &["date", "order date", "sale date", "transaction date"]),
            FieldAliases::new("productCol", &["product", "product name", "item", "sku", "item name"]),
            FieldAliases::new("categoryCol", &["category", "product category", "department"]),
            FieldAliases::new("quantityCol", &["qty", "quantity", "units sold", "units", "volume"]),
            FieldAliases::new("priceCol", &["price", "unit price", "selling price"]),
            FieldAliases::new("revenueCol", &["revenue", "sales", "total sales", "amount", "sales amount"]),
            FieldAliases::new("storeCol", &["store", "store id", "branch", "outlet", "location"]),
            FieldAliases::new("customerCol", &["customer", "customer id", "client"]),
            FieldAliases::new("regionCol", &["region", "area", "territory"]),
        ],
        sections: standard_sections("Sales KPIs", "revenue"),
    }
}

fn finance() -> IndustryProfile {
    IndustryProfile {
        display_name: "Finance".to_string(),
        palette: palette(&["#0f766e", "#1d4ed8", "#b45309", "#be123c", "#4d7c0f", "#6d28d9"]),
        fields: vec![
            FieldAliases::new("dateCol", &["date", "transaction date", "posting date", "period"]),
            FieldAliases::new("accountCol", &["account", "account name", "account id", "ledger"]),
            FieldAliases::new("amountCol", &["amount", "value", "transaction amount"]),
            FieldAliases::new("typeCol", &["type", "transaction type", "debit credit", "dr cr"]),
            FieldAliases::new("categoryCol", &["category", "expense category", "cost center"]),
            FieldAliases::new("budgetCol", &["budget", "budgeted", "planned", "forecast amount"]),
            FieldAliases::new("actualCol", &["actual", "actuals", "actual amount", "spent"]),
            FieldAliases::new("balanceCol", &["balance", "closing balance", "running balance"]),
        ],
        sections: standard_sections("Financial KPIs", "amount"),
    }
}

fn healthcare() -> IndustryProfile {
    IndustryProfile {
        display_name: "Healthcare".to_string(),
        palette: palette(&["#0284c7", "#059669", "#e11d48", "#9333ea", "#ea580c", "#475569"]),
        fields: vec![
            FieldAliases::new("dateCol", &["date", "admission date", "visit date", "discharge date"]),
            FieldAliases::new("patientCol", &["patient", "patient id", "mrn", "patient name"]),
            FieldAliases::new("departmentCol", &["department", "ward", "unit", "specialty"]),
            FieldAliases::new("diagnosisCol", &["diagnosis", "condition", "icd code", "icd10"]),
            FieldAliases::new("costCol", &["cost", "charges", "billing amount", "treatment cost"]),
            FieldAliases::new("stayCol", &["length of stay", "los", "days admitted", "stay days"]),
            FieldAliases::new("outcomeCol", &["outcome", "status", "discharge status"]),
            FieldAliases::new("readmissionCol", &["readmission", "readmitted", "readmit"]),
        ],
        sections: standard_sections("Clinical KPIs", "patients"),
    }
}

fn manufacturing() -> IndustryProfile {
    IndustryProfile {
        display_name: "Manufacturing".to_string(),
        palette: palette(&["#57534e", "#ca8a04", "#2563eb", "#dc2626", "#15803d", "#7e22ce"]),
        fields: vec![
            FieldAliases::new("dateCol", &["date", "production date", "shift date", "batch date"]),
            FieldAliases::new("machineCol", &["machine", "machine id", "equipment", "line", "work center"]),
            FieldAliases::new("productCol", &["product", "part", "part number", "item"]),
            FieldAliases::new("unitsCol", &["units produced", "output", "quantity", "qty", "units"]),
            FieldAliases::new("defectCol", &["defects", "defect count", "rejects", "scrap"]),
            FieldAliases::new("costCol", &["cost", "unit cost", "production cost", "cost per unit"]),
            FieldAliases::new("downtimeCol", &["downtime", "downtime minutes", "downtime hours"]),
            FieldAliases::new("shiftCol", &["shift", "shift id", "crew"]),
        ],
        sections: standard_sections("Production KPIs", "output"),
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_present() {
        let profiles = builtin_profiles();
        assert_eq!(profiles.len(), 4);
        for key in [RETAIL, FINANCE, HEALTHCARE, MANUFACTURING] {
            let profile = profiles.get(key).unwrap();
            assert!(profile.validate(key).is_ok(), "{} profile invalid", key);
        }
    }

    #[test]
    fn test_manufacturing_declares_cost() {
        let profiles = builtin_profiles();
        let manufacturing = &profiles[MANUFACTURING];
        let cost = manufacturing
            .fields
            .iter()
            .find(|f| f.name == "costCol")
            .unwrap();
        assert!(cost.aliases.iter().any(|a| a == "unit cost"));
    }
}
