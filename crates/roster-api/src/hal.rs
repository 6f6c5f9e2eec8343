//! HAL response bodies: a person plus `_links`, and paged collections under
//! `_embedded`.
//!
//! Hrefs are absolute, built from the configured public base URL.

use std::collections::BTreeMap;

use roster_core::{
  Person,
  store::{Page, PageRequest},
};
use serde::Serialize;

/// Collection name; also the `_embedded` key.
pub const COLLECTION: &str = "people";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
  pub href:      String,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub templated: bool,
}

impl Link {
  pub fn new(href: impl Into<String>) -> Self {
    Self { href: href.into(), templated: false }
  }

  pub fn templated(href: impl Into<String>) -> Self {
    Self { href: href.into(), templated: true }
  }
}

pub type Links = BTreeMap<&'static str, Link>;

// ─── Href construction ───────────────────────────────────────────────────────

/// Builds hrefs under a base URL.
#[derive(Debug, Clone)]
pub struct Hrefs {
  base: String,
}

impl Hrefs {
  pub fn new(base_url: &str) -> Self {
    Self { base: base_url.trim_end_matches('/').to_owned() }
  }

  pub fn collection(&self) -> String { format!("{}/{COLLECTION}", self.base) }

  pub fn person(&self, id: i64) -> String { format!("{}/{id}", self.collection()) }

  pub fn search(&self) -> String { format!("{}/search", self.collection()) }

  pub fn find_by_last_name(&self) -> String {
    format!("{}/findByLastName", self.search())
  }

  fn page(&self, req: &PageRequest, page: u64) -> String {
    let mut href = format!("{}?page={page}&size={}", self.collection(), req.size);
    if let Some(sort) = req.sort {
      href.push_str(&format!("&sort={sort}"));
    }
    href
  }
}

// ─── Single resource ─────────────────────────────────────────────────────────

/// A person as returned by the API: its fields plus `_links`.
#[derive(Debug, Clone, Serialize)]
pub struct PersonResource {
  #[serde(flatten)]
  pub person: Person,
  #[serde(rename = "_links")]
  pub links:  Links,
}

impl PersonResource {
  pub fn new(person: Person, hrefs: &Hrefs) -> Self {
    let href  = hrefs.person(person.id);
    let links = Links::from([
      ("self", Link::new(href.clone())),
      ("person", Link::new(href)),
    ]);
    Self { person, links }
  }
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Embedded {
  pub people: Vec<PersonResource>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
  pub size:           u32,
  pub total_elements: u64,
  pub total_pages:    u64,
  pub number:         u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionResource {
  #[serde(rename = "_embedded")]
  pub embedded: Embedded,
  #[serde(rename = "_links")]
  pub links:    Links,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub page:     Option<PageMetadata>,
}

impl CollectionResource {
  /// A page of people with navigation links.
  pub fn paged(page: Page<Person>, req: &PageRequest, hrefs: &Hrefs) -> Self {
    let mut links = Links::from([
      ("self", Link::new(hrefs.page(req, u64::from(page.number)))),
      ("search", Link::new(hrefs.search())),
    ]);
    if page.total_pages > 1 {
      links.insert("first", Link::new(hrefs.page(req, 0)));
      links.insert("last", Link::new(hrefs.page(req, page.total_pages - 1)));
    }
    if page.has_previous() {
      links.insert("prev", Link::new(hrefs.page(req, u64::from(page.number) - 1)));
    }
    if page.has_next() {
      links.insert("next", Link::new(hrefs.page(req, u64::from(page.number) + 1)));
    }

    let metadata = PageMetadata {
      size:           page.size,
      total_elements: page.total_elements,
      total_pages:    page.total_pages,
      number:         page.number,
    };

    Self {
      embedded: Embedded { people: resources(page.content, hrefs) },
      links,
      page: Some(metadata),
    }
  }

  /// An unpaged search result.
  pub fn search(people: Vec<Person>, self_href: String, hrefs: &Hrefs) -> Self {
    Self {
      embedded: Embedded { people: resources(people, hrefs) },
      links:    Links::from([("self", Link::new(self_href))]),
      page:     None,
    }
  }
}

fn resources(people: Vec<Person>, hrefs: &Hrefs) -> Vec<PersonResource> {
  people
    .into_iter()
    .map(|p| PersonResource::new(p, hrefs))
    .collect()
}

/// Body of `GET /people/search`: the available search methods.
#[derive(Debug, Clone, Serialize)]
pub struct SearchIndex {
  #[serde(rename = "_links")]
  pub links: Links,
}

impl SearchIndex {
  pub fn new(hrefs: &Hrefs) -> Self {
    Self {
      links: Links::from([
        ("self", Link::new(hrefs.search())),
        (
          "findByLastName",
          Link::templated(format!("{}{{?name}}", hrefs.find_by_last_name())),
        ),
      ]),
    }
  }
}
