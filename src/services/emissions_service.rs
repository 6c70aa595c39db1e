//! Monthly personal carbon footprint from home energy, commuting and diet.
//!
//! Inputs keep the wire shape the calculator page sends: transport and food
//! are maps keyed by the Chinese mode/category label. Keys outside the factor
//! table contribute nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// kg CO₂e per kWh of electricity.
pub const ELECTRICITY_FACTOR: f64 = 0.509;
/// kg CO₂e per unit (度) of natural gas.
pub const GAS_FACTOR: f64 = 2.115;
/// Food frequencies are entered per week and scaled to a month.
pub const WEEKS_PER_MONTH: f64 = 4.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    #[serde(rename = "機車")]
    Scooter,
    #[serde(rename = "汽車")]
    Car,
    #[serde(rename = "公車")]
    Bus,
    #[serde(rename = "高鐵")]
    HighSpeedRail,
    #[serde(rename = "捷運/火車")]
    MetroOrTrain,
}

impl TransportMode {
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Scooter,
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::HighSpeedRail,
        TransportMode::MetroOrTrain,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransportMode::Scooter => "機車",
            TransportMode::Car => "汽車",
            TransportMode::Bus => "公車",
            TransportMode::HighSpeedRail => "高鐵",
            TransportMode::MetroOrTrain => "捷運/火車",
        }
    }

    /// kg CO₂e per km.
    pub fn factor(self) -> f64 {
        match self {
            TransportMode::Scooter => 0.054,
            TransportMode::Car => 0.170,
            TransportMode::Bus => 0.026,
            TransportMode::HighSpeedRail => 0.015,
            TransportMode::MetroOrTrain => 0.017,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodCategory {
    #[serde(rename = "牛肉")]
    Beef,
    #[serde(rename = "豬肉")]
    Pork,
    #[serde(rename = "羊肉")]
    Lamb,
    #[serde(rename = "家禽")]
    Poultry,
    #[serde(rename = "魚類")]
    Fish,
    #[serde(rename = "奶製品/蛋")]
    DairyAndEggs,
    #[serde(rename = "素食")]
    Vegetarian,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Beef,
        FoodCategory::Pork,
        FoodCategory::Lamb,
        FoodCategory::Poultry,
        FoodCategory::Fish,
        FoodCategory::DairyAndEggs,
        FoodCategory::Vegetarian,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FoodCategory::Beef => "牛肉",
            FoodCategory::Pork => "豬肉",
            FoodCategory::Lamb => "羊肉",
            FoodCategory::Poultry => "家禽",
            FoodCategory::Fish => "魚類",
            FoodCategory::DairyAndEggs => "奶製品/蛋",
            FoodCategory::Vegetarian => "素食",
        }
    }

    /// kg CO₂e per serving.
    pub fn factor(self) -> f64 {
        match self {
            FoodCategory::Beef => 20.0,
            FoodCategory::Pork => 7.0,
            FoodCategory::Lamb => 5.0,
            FoodCategory::Poultry => 3.0,
            FoodCategory::Fish => 2.0,
            FoodCategory::DairyAndEggs => 1.0,
            FoodCategory::Vegetarian => 0.5,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeUsage {
    /// kWh per month.
    #[serde(default)]
    pub elec: f64,
    /// Gas units per month.
    #[serde(default)]
    pub gas: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    #[serde(default)]
    pub home: HomeUsage,
    /// km per month, keyed by transport mode label.
    #[serde(default)]
    pub transport: BTreeMap<String, f64>,
    /// Servings per week, keyed by food category label.
    #[serde(default)]
    pub food: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionsBreakdown {
    pub home_kg: f64,
    pub transport_kg: f64,
    pub food_kg: f64,
    pub total_monthly_kg: f64,
    pub annual_kg: f64,
}

/// Same figures rounded to two decimals for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayBreakdown {
    pub home_kg: String,
    pub transport_kg: String,
    pub food_kg: String,
    pub total_monthly_kg: String,
    pub annual_kg: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorEntry {
    pub label: &'static str,
    pub factor: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorTable {
    pub electricity: f64,
    pub gas: f64,
    pub transport: Vec<FactorEntry>,
    pub food: Vec<FactorEntry>,
    pub weeks_per_month: f64,
}

pub fn home_emissions(home: &HomeUsage) -> f64 {
    home.elec * ELECTRICITY_FACTOR + home.gas * GAS_FACTOR
}

pub fn transport_emissions(transport: &BTreeMap<String, f64>) -> f64 {
    transport
        .iter()
        .map(|(mode, km)| km * TransportMode::from_label(mode).map_or(0.0, TransportMode::factor))
        .sum()
}

pub fn food_emissions(food: &BTreeMap<String, f64>) -> f64 {
    food.iter()
        .map(|(category, weekly)| {
            weekly
                * FoodCategory::from_label(category).map_or(0.0, FoodCategory::factor)
                * WEEKS_PER_MONTH
        })
        .sum()
}

pub fn calculate(inputs: &CalculatorInputs) -> EmissionsBreakdown {
    let home_kg = home_emissions(&inputs.home);
    let transport_kg = transport_emissions(&inputs.transport);
    let food_kg = food_emissions(&inputs.food);
    let total_monthly_kg = home_kg + transport_kg + food_kg;

    EmissionsBreakdown {
        home_kg,
        transport_kg,
        food_kg,
        total_monthly_kg,
        annual_kg: total_monthly_kg * MONTHS_PER_YEAR,
    }
}

impl EmissionsBreakdown {
    pub fn display(&self) -> DisplayBreakdown {
        DisplayBreakdown {
            home_kg: format!("{:.2}", self.home_kg),
            transport_kg: format!("{:.2}", self.transport_kg),
            food_kg: format!("{:.2}", self.food_kg),
            total_monthly_kg: format!("{:.2}", self.total_monthly_kg),
            annual_kg: format!("{:.2}", self.annual_kg),
        }
    }
}

pub fn factor_table() -> FactorTable {
    FactorTable {
        electricity: ELECTRICITY_FACTOR,
        gas: GAS_FACTOR,
        transport: TransportMode::ALL
            .into_iter()
            .map(|m| FactorEntry {
                label: m.label(),
                factor: m.factor(),
            })
            .collect(),
        food: FoodCategory::ALL
            .into_iter()
            .map(|c| FactorEntry {
                label: c.label(),
                factor: c.factor(),
            })
            .collect(),
        weeks_per_month: WEEKS_PER_MONTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn worked_example() -> CalculatorInputs {
        CalculatorInputs {
            home: HomeUsage {
                elec: 100.0,
                gas: 10.0,
            },
            transport: BTreeMap::from([("汽車".to_string(), 50.0)]),
            food: BTreeMap::from([("牛肉".to_string(), 2.0)]),
        }
    }

    #[test]
    fn worked_example_matches_reference_figures() {
        let b = calculate(&worked_example());
        // 100 * 0.509 + 10 * 2.115
        assert!(approx(b.home_kg, 72.05));
        assert!(approx(b.transport_kg, 8.5));
        assert!(approx(b.food_kg, 160.0));
        assert!(approx(b.total_monthly_kg, 240.55));
        assert!(approx(b.annual_kg, 2886.6));
        assert_eq!(b.display().total_monthly_kg, "240.55");
    }

    #[test]
    fn total_is_sum_of_subtotals_and_annual_is_twelve_months() {
        let mut inputs = worked_example();
        inputs.transport.insert("機車".into(), 123.4);
        inputs.transport.insert("捷運/火車".into(), 300.0);
        inputs.food.insert("素食".into(), 7.0);
        inputs.food.insert("魚類".into(), 1.5);

        let b = calculate(&inputs);
        assert_eq!(b.total_monthly_kg, b.home_kg + b.transport_kg + b.food_kg);
        assert_eq!(b.annual_kg, b.total_monthly_kg * 12.0);
    }

    #[test]
    fn unknown_keys_contribute_nothing() {
        let inputs = CalculatorInputs {
            transport: BTreeMap::from([("飛機".to_string(), 1000.0)]),
            food: BTreeMap::from([("外星食物".to_string(), 3.0)]),
            ..Default::default()
        };
        assert_eq!(calculate(&inputs).total_monthly_kg, 0.0);
    }

    #[test]
    fn negative_inputs_pass_through_unclamped() {
        let inputs = CalculatorInputs {
            home: HomeUsage {
                elec: -10.0,
                gas: 0.0,
            },
            ..Default::default()
        };
        assert!(approx(calculate(&inputs).home_kg, -5.09));
    }

    #[test]
    fn missing_sections_default_to_zero() {
        let inputs: CalculatorInputs = serde_json::from_str(r#"{"home":{"elec":10}}"#).unwrap();
        assert!(approx(calculate(&inputs).total_monthly_kg, 5.09));
    }

    #[test]
    fn factor_table_lists_every_mode_and_category() {
        let table = factor_table();
        assert_eq!(table.transport.len(), 5);
        assert_eq!(table.food.len(), 7);
        assert_eq!(table.transport[1].label, "汽車");
    }
}
