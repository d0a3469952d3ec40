use crate::model::artifact::{HandleUnknown, Preprocessor};
use crate::types::{FeatureRecord, FeatureValue};

impl Preprocessor {
    /// Turn a named feature record into the dense vector the trees were fit on.
    /// Extra columns in the record are ignored; missing ones are an error.
    pub fn encode(&self, record: &FeatureRecord) -> Result<Vec<f64>, String> {
        let mut x = Vec::with_capacity(self.width());

        for name in &self.numeric {
            let value = match record.get(name) {
                Some(FeatureValue::Number(n)) => *n,
                Some(FeatureValue::Text(s)) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("column {name}: {s:?} is not a number"))?,
                None => return Err(missing(name, record)),
            };
            x.push(value);
        }

        for column in &self.categorical {
            let value = match record.get(&column.name) {
                Some(v) => v.to_string(),
                None => return Err(missing(&column.name, record)),
            };
            let hit = column.categories.iter().position(|c| *c == value);
            if hit.is_none() && self.handle_unknown == HandleUnknown::Error {
                return Err(format!(
                    "column {}: unknown category {value:?} (trained on {})",
                    column.name,
                    column.categories.join(", ")
                ));
            }
            x.extend((0..column.categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        }

        Ok(x)
    }
}

fn missing(name: &str, record: &FeatureRecord) -> String {
    let present: Vec<&str> = record.names().collect();
    format!("column {name} missing from record (has {})", present.join(", "))
}
