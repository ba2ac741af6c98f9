#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    /// Home page grid of cards.
    Columns,
    /// Settings page list rows.
    Rows,
}

impl ListLayout {
    pub fn display_value(&self) -> &'static str {
        match self {
            ListLayout::Columns => "block",
            ListLayout::Rows => "flex",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemVisibility {
    Shown(&'static str),
    Hidden,
    /// Item has no name label and is never touched by the filter.
    Untouched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub items: Vec<ItemVisibility>,
    pub visible_count: usize,
    pub show_section: bool,
    pub show_not_found: bool,
}

pub struct ClinicListFilter {
    layout: ListLayout,
    names: Vec<Option<String>>,
}

impl ClinicListFilter {
    pub fn new(layout: ListLayout, names: Vec<Option<String>>) -> Self {
        let names = names
            .into_iter()
            .map(|name| name.map(|n| n.to_lowercase()))
            .collect();
        Self { layout, names }
    }

    pub fn apply(&self, query: &str) -> FilterOutcome {
        let needle = query.to_lowercase();
        let mut visible_count = 0;
        let items = self
            .names
            .iter()
            .map(|name| match name {
                Some(name) if name.contains(&needle) => {
                    visible_count += 1;
                    ItemVisibility::Shown(self.layout.display_value())
                }
                Some(_) => ItemVisibility::Hidden,
                None => ItemVisibility::Untouched,
            })
            .collect();
        FilterOutcome {
            items,
            visible_count,
            show_section: visible_count > 0,
            show_not_found: visible_count == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clinics() -> ClinicListFilter {
        ClinicListFilter::new(
            ListLayout::Rows,
            vec![
                Some("Veterinaria San Roque".to_string()),
                None,
                Some("Clínica Patitas".to_string()),
            ],
        )
    }

    #[test]
    fn matches_case_insensitively() {
        let outcome = clinics().apply("SAN");
        assert_eq!(
            outcome.items,
            vec![
                ItemVisibility::Shown("flex"),
                ItemVisibility::Untouched,
                ItemVisibility::Hidden
            ]
        );
        assert_eq!(outcome.visible_count, 1);
        assert!(outcome.show_section);
        assert!(!outcome.show_not_found);
    }

    #[test]
    fn no_match_hides_section_and_shows_message() {
        let outcome = clinics().apply("hospital");
        assert_eq!(outcome.visible_count, 0);
        assert!(!outcome.show_section);
        assert!(outcome.show_not_found);
    }

    #[test]
    fn empty_query_shows_every_named_item_in_column_layout() {
        let filter = ClinicListFilter::new(
            ListLayout::Columns,
            vec![Some("A".to_string()), Some("B".to_string())],
        );
        let outcome = filter.apply("");
        assert_eq!(outcome.visible_count, 2);
        assert!(outcome.items.iter().all(|i| *i == ItemVisibility::Shown("block")));
    }
}
