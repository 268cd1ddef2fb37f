use serde::{Deserialize, Serialize};

use crate::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    Home,
    Popular,
    Newest,
    EndingSoon,
    MostFunded,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Home => "home",
            Sort::Popular => "popularity",
            Sort::Newest => "newest",
            Sort::EndingSoon => "end_date",
            Sort::MostFunded => "most_funded",
        }
    }

    /// Suffix appended to ref tags for this sort.
    pub(crate) fn ref_tag_suffix(self) -> &'static str {
        match self {
            Sort::Home => "_home",
            Sort::Popular => "_popular",
            Sort::Newest => "_newest",
            Sort::EndingSoon => "_ending_soon",
            Sort::MostFunded => "_most_funded",
        }
    }
}

/// Immutable description of one feed query.
///
/// Values are never mutated; a selection builds a new value through
/// [`DiscoveryParams::builder`] or [`DiscoveryParams::to_builder`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscoveryParams {
    category: Option<Category>,
    sort: Option<Sort>,
    saved_only: bool,
    page: Option<u32>,
}

impl DiscoveryParams {
    pub fn builder() -> DiscoveryParamsBuilder {
        DiscoveryParamsBuilder::default()
    }

    pub fn to_builder(&self) -> DiscoveryParamsBuilder {
        DiscoveryParamsBuilder {
            inner: self.clone(),
        }
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn is_saved_projects(&self) -> bool {
        self.saved_only
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// Query pairs for the discover endpoint, in a stable order.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(category) = &self.category {
            pairs.push(("category_id", category.id.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if self.saved_only {
            pairs.push(("starred", "1".to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    /// Replaces a partially known category (deep links carry only an id or
    /// slug) with the matching root-category record. Subcategories in `roots`
    /// are never matched.
    pub(crate) fn resolve_category(self, roots: &[Category]) -> Self {
        let Some(category) = &self.category else {
            return self;
        };
        let found = roots.iter().filter(|root| root.is_root()).find(|root| {
            root.id == category.id || (!category.slug.is_empty() && root.slug == category.slug)
        });
        match found {
            Some(root) if root != category => self.to_builder().category(root.clone()).build(),
            _ => self,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryParamsBuilder {
    inner: DiscoveryParams,
}

impl DiscoveryParamsBuilder {
    pub fn category(mut self, category: Category) -> Self {
        self.inner.category = Some(category);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.inner.sort = Some(sort);
        self
    }

    pub fn saved_only(mut self, saved_only: bool) -> Self {
        self.inner.saved_only = saved_only;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.inner.page = Some(page);
        self
    }

    pub fn build(self) -> DiscoveryParams {
        self.inner
    }
}
