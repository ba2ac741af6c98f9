use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::models::breed::Breed;

pub const PLACEHOLDER: &str = "---------";
pub const LOAD_FAILED: &str = "Error al cargar razas";

#[async_trait]
pub trait BreedApi: Send + Sync {
    async fn breeds_for_species(&self, especie_id: &str) -> Result<Vec<Breed>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedLoad {
    /// No species chosen; the select is emptied and disabled.
    Cleared,
    Loaded,
    Failed,
}

/// State of the breed `<select>` that depends on the chosen species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedSelect {
    pub options: Vec<Breed>,
    pub selected: Option<u64>,
    pub enabled: bool,
    pub placeholder: String,
}

impl Default for BreedSelect {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            selected: None,
            enabled: false,
            placeholder: PLACEHOLDER.to_string(),
        }
    }
}

impl BreedSelect {
    /// A form rendered with a species but no breed options yet.
    pub fn needs_initial_load(&self, especie_id: Option<&str>) -> bool {
        especie_id.is_some_and(|id| !id.trim().is_empty()) && self.options.is_empty()
    }

    pub async fn load<A: BreedApi + ?Sized>(
        &mut self,
        api: &A,
        especie_id: Option<&str>,
        keep_selection: bool,
    ) -> BreedLoad {
        let previous = self.selected.take();
        self.options.clear();
        self.enabled = false;
        self.placeholder = PLACEHOLDER.to_string();

        let Some(especie_id) = especie_id.map(str::trim).filter(|id| !id.is_empty()) else {
            return BreedLoad::Cleared;
        };

        match api.breeds_for_species(especie_id).await {
            Ok(breeds) => {
                if keep_selection {
                    self.selected = previous.filter(|id| breeds.iter().any(|b| b.id == *id));
                }
                self.options = breeds;
                self.enabled = true;
                BreedLoad::Loaded
            }
            Err(err) => {
                warn!(especie_id, error = %err, "Failed to load breeds");
                self.placeholder = LOAD_FAILED.to_string();
                BreedLoad::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;

    struct FakeBreeds {
        response: std::result::Result<Vec<Breed>, u16>,
    }

    #[async_trait]
    impl BreedApi for FakeBreeds {
        async fn breeds_for_species(&self, _especie_id: &str) -> Result<Vec<Breed>> {
            match &self.response {
                Ok(breeds) => Ok(breeds.clone()),
                Err(status) => Err(BookingError::Status(*status)),
            }
        }
    }

    fn breeds() -> Vec<Breed> {
        vec![
            Breed {
                id: 1,
                nombre: "Beagle".to_string(),
            },
            Breed {
                id: 2,
                nombre: "Labrador".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn keeps_previous_selection_when_still_offered() {
        let api = FakeBreeds {
            response: Ok(breeds()),
        };
        let mut select = BreedSelect {
            selected: Some(2),
            ..BreedSelect::default()
        };
        assert_eq!(select.load(&api, Some("1"), true).await, BreedLoad::Loaded);
        assert!(select.enabled);
        assert_eq!(select.selected, Some(2));
        assert_eq!(select.options.len(), 2);
    }

    #[tokio::test]
    async fn species_change_discards_selection() {
        let api = FakeBreeds {
            response: Ok(breeds()),
        };
        let mut select = BreedSelect {
            selected: Some(2),
            ..BreedSelect::default()
        };
        select.load(&api, Some("1"), false).await;
        assert_eq!(select.selected, None);
    }

    #[tokio::test]
    async fn blank_species_disables_select() {
        let api = FakeBreeds {
            response: Ok(breeds()),
        };
        let mut select = BreedSelect::default();
        assert_eq!(select.load(&api, Some(""), true).await, BreedLoad::Cleared);
        assert!(!select.enabled);
        assert!(select.options.is_empty());
        assert_eq!(select.placeholder, PLACEHOLDER);
    }

    #[tokio::test]
    async fn failure_shows_error_placeholder() {
        let api = FakeBreeds { response: Err(500) };
        let mut select = BreedSelect::default();
        assert_eq!(select.load(&api, Some("2"), true).await, BreedLoad::Failed);
        assert!(!select.enabled);
        assert_eq!(select.placeholder, LOAD_FAILED);
    }

    #[test]
    fn initial_load_only_without_options() {
        let mut select = BreedSelect::default();
        assert!(select.needs_initial_load(Some("1")));
        assert!(!select.needs_initial_load(None));
        select.options = breeds();
        assert!(!select.needs_initial_load(Some("1")));
    }
}
