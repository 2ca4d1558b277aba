/*
 * Copyright (c) 2021 gematik GmbH
 * 
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 * 
 *    http://www.apache.org/licenses/LICENSE-2.0
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use serde::{Deserialize, Serialize};

/// Entry of the drug catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drug {
    pub id: String,
    pub ndc_drug_code: String,
    pub trade_name: String,
    pub drug_list_id: String,

    #[serde(default)]
    pub ha_code: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub manufacturer: Option<String>,

    #[serde(default)]
    pub local_agent: Option<String>,

    #[serde(default)]
    pub dosage_form: Option<String>,

    #[serde(default)]
    pub package_type: Option<String>,

    #[serde(default)]
    pub package_size: Option<String>,

    #[serde(default)]
    pub granular_unit: Option<u32>,

    #[serde(default)]
    pub unit_type: Option<String>,

    #[serde(default)]
    pub active_ingredients: Option<String>,

    #[serde(default)]
    pub strengths: Option<String>,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub dispensed_quantity: Option<u32>,

    #[serde(default)]
    pub days_of_supply: Option<u32>,

    #[serde(default)]
    pub instructions: Option<String>,
}

/// Partial update of a catalog entry.
///
/// Absent or empty text fields keep the current value. Numbers are replaced
/// whenever they are present. An empty date clears the date.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DrugUpdate {
    pub ndc_drug_code: Option<String>,
    pub trade_name: Option<String>,
    pub drug_list_id: Option<String>,
    pub ha_code: Option<String>,
    pub status: Option<String>,
    pub manufacturer: Option<String>,
    pub local_agent: Option<String>,
    pub dosage_form: Option<String>,
    pub package_type: Option<String>,
    pub package_size: Option<String>,
    pub granular_unit: Option<u32>,
    pub unit_type: Option<String>,
    pub active_ingredients: Option<String>,
    pub strengths: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dispensed_quantity: Option<u32>,
    pub days_of_supply: Option<u32>,
    pub instructions: Option<String>,
}

impl Drug {
    /// Turns empty dates and instructions into `None`.
    pub fn normalize(mut self) -> Self {
        self.start_date = self.start_date.filter(|d| !d.is_empty());
        self.end_date = self.end_date.filter(|d| !d.is_empty());
        self.instructions = self.instructions.filter(|i| !i.is_empty());

        self
    }

    pub fn apply(&mut self, update: DrugUpdate) {
        replace_text(&mut self.ndc_drug_code, update.ndc_drug_code);
        replace_text(&mut self.trade_name, update.trade_name);
        replace_text(&mut self.drug_list_id, update.drug_list_id);

        replace_opt_text(&mut self.ha_code, update.ha_code);
        replace_opt_text(&mut self.status, update.status);
        replace_opt_text(&mut self.manufacturer, update.manufacturer);
        replace_opt_text(&mut self.local_agent, update.local_agent);
        replace_opt_text(&mut self.dosage_form, update.dosage_form);
        replace_opt_text(&mut self.package_type, update.package_type);
        replace_opt_text(&mut self.package_size, update.package_size);
        replace_opt_text(&mut self.unit_type, update.unit_type);
        replace_opt_text(&mut self.active_ingredients, update.active_ingredients);
        replace_opt_text(&mut self.strengths, update.strengths);
        replace_opt_text(&mut self.instructions, update.instructions);

        replace_date(&mut self.start_date, update.start_date);
        replace_date(&mut self.end_date, update.end_date);

        if update.granular_unit.is_some() {
            self.granular_unit = update.granular_unit;
        }

        if update.dispensed_quantity.is_some() {
            self.dispensed_quantity = update.dispensed_quantity;
        }

        if update.days_of_supply.is_some() {
            self.days_of_supply = update.days_of_supply;
        }
    }
}

fn replace_text(current: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *current = value;
    }
}

fn replace_opt_text(current: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *current = Some(value);
    }
}

fn replace_date(current: &mut Option<String>, value: Option<String>) {
    match value {
        Some(value) if value.is_empty() => *current = None,
        Some(value) => *current = Some(value),
        None => (),
    }
}
