// Runner domain model
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Runner {
    pub id: String,
    pub name: String,
}

impl Runner {
    pub fn new(id: String) -> Self {
        let name = Self::format_name(&id);
        Self { id, name }
    }

    fn format_name(id: &str) -> String {
        // Convert "anna_k" to "Anna K"
        id.split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        let runner = Runner::new("anna_k".to_string());
        assert_eq!(runner.name, "Anna K");

        let runner = Runner::new("marathon_mike_72".to_string());
        assert_eq!(runner.name, "Marathon Mike 72");

        let runner = Runner::new("solo".to_string());
        assert_eq!(runner.name, "Solo");
    }
}
