//! Registry of the twelve gallery demos.

use serde::{Deserialize, Serialize};

use crate::core::errors::{FrlError, Result};
use crate::filter::evaluate::{EvalContext, evaluate};
use crate::filter::predicate::FilterPredicate;
use crate::filter::record::{Record, RecordSet};

/// Every demo in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoKind {
    FormFromHell,
    JargonFile,
    ModalFromNowhere,
    OverCelebratingTodo,
    HitSave,
    TabsWontSwitch,
    WaitForever,
    TabsParade,
    EmptySpaces,
    GhostInTheShell,
    FilterByOne,
    ListVsTable,
}

impl DemoKind {
    /// Gallery order.
    pub const ALL: [Self; 12] = [
        Self::FormFromHell,
        Self::JargonFile,
        Self::ModalFromNowhere,
        Self::OverCelebratingTodo,
        Self::HitSave,
        Self::TabsWontSwitch,
        Self::WaitForever,
        Self::TabsParade,
        Self::EmptySpaces,
        Self::GhostInTheShell,
        Self::FilterByOne,
        Self::ListVsTable,
    ];

    /// Stable kebab-case identifier used by the CLI and logs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::FormFromHell => "form-from-hell",
            Self::JargonFile => "jargon-file",
            Self::ModalFromNowhere => "modal-from-nowhere",
            Self::OverCelebratingTodo => "over-celebrating-todo",
            Self::HitSave => "hit-save",
            Self::TabsWontSwitch => "tabs-wont-switch",
            Self::WaitForever => "wait-forever",
            Self::TabsParade => "tabs-parade",
            Self::EmptySpaces => "empty-spaces",
            Self::GhostInTheShell => "ghost-in-the-shell",
            Self::FilterByOne => "filter-by-one",
            Self::ListVsTable => "list-vs-table",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FormFromHell => "Form from Hell",
            Self::JargonFile => "Jargon File",
            Self::ModalFromNowhere => "Modal from Nowhere",
            Self::OverCelebratingTodo => "Over-Celebrating Todo",
            Self::HitSave => "Hit Save or Die",
            Self::TabsWontSwitch => "Tabs Won't Switch",
            Self::WaitForever => "Wait Forever",
            Self::TabsParade => "Tabs on Parade",
            Self::EmptySpaces => "Empty Spaces",
            Self::GhostInTheShell => "Ghost in the Shell",
            Self::FilterByOne => "Filter by One",
            Self::ListVsTable => "List vs. Table",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FormFromHell => "Hostile validation that clears fields vs. forgiving inline hints",
            Self::JargonFile => "Internal jargon error walls vs. plain-language recovery paths",
            Self::ModalFromNowhere => "Blocking modal interruptions vs. passive dismissible toasts",
            Self::OverCelebratingTodo => "Confetti for every checkbox vs. proportional feedback",
            Self::HitSave => "Manual save under a crash countdown vs. periodic autosave",
            Self::TabsWontSwitch => "Tabs that discard state on switch vs. tabs that keep it",
            Self::WaitForever => "Unbounded spinners vs. progress with a cancel path",
            Self::TabsParade => "A tab for everything vs. progressive disclosure",
            Self::EmptySpaces => "Dead-end empty states vs. empty states that suggest an action",
            Self::GhostInTheShell => "Blocking chat sends vs. streaming replies with a stop button",
            Self::FilterByOne => "Explicit column filters vs. global search with facet refinements",
            Self::ListVsTable => "Walls of identical rows vs. scannable structured tables",
        }
    }

    /// Which demos host a deferred-action trap.
    #[must_use]
    pub const fn uses_scheduler(self) -> bool {
        matches!(
            self,
            Self::ModalFromNowhere | Self::GhostInTheShell | Self::HitSave | Self::WaitForever
        )
    }

    /// Which demos run the facet filter evaluator.
    #[must_use]
    pub const fn uses_filter(self) -> bool {
        matches!(self, Self::FilterByOne | Self::ListVsTable | Self::EmptySpaces)
    }
}

/// A catalog row: kind plus its static metadata, flattened for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoEntry {
    /// Which demo.
    pub kind: DemoKind,
    /// Stable identifier.
    pub slug: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
}

impl From<DemoKind> for DemoEntry {
    fn from(kind: DemoKind) -> Self {
        Self {
            kind,
            slug: kind.slug(),
            title: kind.title(),
            description: kind.description(),
        }
    }
}

/// Ordered registry of all demos with slug lookup and free-text search.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    entries: Vec<DemoEntry>,
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl DemoCatalog {
    /// The full gallery in its canonical order.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: DemoKind::ALL.iter().copied().map(DemoEntry::from).collect(),
        }
    }

    /// All entries in gallery order.
    #[must_use]
    pub fn entries(&self) -> &[DemoEntry] {
        &self.entries
    }

    /// Look up a demo by slug.
    pub fn by_slug(&self, slug: &str) -> Result<DemoEntry> {
        self.entries
            .iter()
            .find(|e| e.slug == slug)
            .copied()
            .ok_or_else(|| FrlError::UnknownDemo {
                slug: slug.to_string(),
            })
    }

    /// Free-text search across slug, title, and description, implemented
    /// on the facet filter evaluator. Empty needle returns everything.
    #[must_use]
    pub fn search(&self, needle: &str, ctx: &EvalContext) -> Vec<DemoEntry> {
        let records: RecordSet = self
            .entries
            .iter()
            .map(|e| {
                Record::new()
                    .with("slug", e.slug)
                    .with("title", e.title)
                    .with("description", e.description)
            })
            .collect();
        let query = vec![FilterPredicate::GlobalContains {
            value: needle.to_string(),
            fields: vec![
                "slug".to_string(),
                "title".to_string(),
                "description".to_string(),
            ],
        }];
        let matched = evaluate(&records, &query, ctx);
        // Map matched records back to entries by slug; order is preserved
        // on both sides.
        matched
            .iter()
            .filter_map(|r| r.get("slug").map(crate::filter::record::FieldValue::search_text))
            .filter_map(|slug| self.by_slug(&slug).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> EvalContext {
        EvalContext::with_reference(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
    }

    #[test]
    fn catalog_has_twelve_demos_in_gallery_order() {
        let catalog = DemoCatalog::standard();
        assert_eq!(catalog.entries().len(), 12);
        assert_eq!(catalog.entries()[0].kind, DemoKind::FormFromHell);
        assert_eq!(catalog.entries()[11].kind, DemoKind::ListVsTable);
    }

    #[test]
    fn slugs_are_unique() {
        let catalog = DemoCatalog::standard();
        let slugs: std::collections::HashSet<&str> =
            catalog.entries().iter().map(|e| e.slug).collect();
        assert_eq!(slugs.len(), catalog.entries().len());
    }

    #[test]
    fn slug_lookup_finds_demo() {
        let catalog = DemoCatalog::standard();
        let entry = catalog.by_slug("modal-from-nowhere").unwrap();
        assert_eq!(entry.kind, DemoKind::ModalFromNowhere);
    }

    #[test]
    fn unknown_slug_errors_with_code() {
        let catalog = DemoCatalog::standard();
        let err = catalog.by_slug("nope").unwrap_err();
        assert_eq!(err.code(), "FRL-2001");
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let catalog = DemoCatalog::standard();
        let hits = catalog.search("MODAL", &ctx());
        assert!(hits.iter().any(|e| e.kind == DemoKind::ModalFromNowhere));
    }

    #[test]
    fn search_matches_description_words() {
        let catalog = DemoCatalog::standard();
        let hits = catalog.search("autosave", &ctx());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, DemoKind::HitSave);
    }

    #[test]
    fn empty_search_returns_full_catalog() {
        let catalog = DemoCatalog::standard();
        assert_eq!(catalog.search("", &ctx()).len(), 12);
    }

    #[test]
    fn scheduler_and_filter_tags_cover_expected_demos() {
        assert!(DemoKind::ModalFromNowhere.uses_scheduler());
        assert!(DemoKind::HitSave.uses_scheduler());
        assert!(DemoKind::FilterByOne.uses_filter());
        assert!(!DemoKind::TabsParade.uses_scheduler());
    }
}
