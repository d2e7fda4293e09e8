//! Parts and manuals reference links for a model number.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{validate_link_base, validate_non_empty_string, Validate};

/// Characters left as-is when a model is written into a link: unreserved
/// marks plus `/`.
const MODEL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

fn encode_model(model: &str) -> String {
    utf8_percent_encode(model, MODEL_SAFE).to_string()
}

/// A reference site. The model goes into `query_param` when set, otherwise
/// it is appended to `base` as a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTemplate {
    pub label: String,
    pub base: String,
    #[serde(default)]
    pub query_param: Option<String>,
}

impl LinkTemplate {
    pub fn query(label: &str, base: &str, param: &str) -> Self {
        Self {
            label: label.to_string(),
            base: base.to_string(),
            query_param: Some(param.to_string()),
        }
    }

    pub fn path(label: &str, base: &str) -> Self {
        Self {
            label: label.to_string(),
            base: base.to_string(),
            query_param: None,
        }
    }

    fn invalid_base(&self, reason: impl Into<String>) -> LookupError {
        LookupError::InvalidConfigValueError {
            field: format!("links.{}.base", self.label),
            value: self.base.clone(),
            reason: reason.into(),
        }
    }

    pub fn url_for(&self, model: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base).map_err(|e| self.invalid_base(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(self.invalid_base("URL cannot take a model number"));
        }
        let model = encode_model(model);
        match &self.query_param {
            Some(param) => {
                let pair = format!("{}={}", encode_model(param), model);
                let query = match url.query() {
                    Some(existing) if !existing.is_empty() => format!("{}&{}", existing, pair),
                    _ => pair,
                };
                url.set_query(Some(&query));
            }
            None => {
                let path = format!("{}/{}", url.path().trim_end_matches('/'), model);
                url.set_path(&path);
            }
        }
        Ok(url)
    }
}

impl Validate for LinkTemplate {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("links.label", &self.label)?;
        validate_link_base(&format!("links.{}.base", self.label), &self.base)?;
        if let Some(param) = &self.query_param {
            validate_non_empty_string(&format!("links.{}.query_param", self.label), param)?;
        }
        Ok(())
    }
}

pub fn default_catalog() -> Vec<LinkTemplate> {
    vec![
        LinkTemplate::query(
            "Appliance Parts Pros",
            "https://www.appliancepartspros.com/search.aspx",
            "model",
        ),
        LinkTemplate::query("Appliantology", "https://appliantology.org/search/", "q"),
        LinkTemplate::path("Bosch", "https://www.bosch-home.com/us/supportdetail/product"),
        LinkTemplate::query(
            "Encompass Parts",
            "https://encompass.com/modelsearch_results.aspx",
            "searchTerm",
        ),
        LinkTemplate::query("ManualsLib", "https://www.manualslib.com/search.html", "q"),
        LinkTemplate::query(
            "Marcone",
            "https://www.marcone.com/marcone-sso/login.jsp",
            "modelNumber",
        ),
        LinkTemplate::query("PartsDr", "https://partsdr.com/search/search.php", "q"),
        LinkTemplate::query(
            "PartSelect",
            "https://www.partselect.com/ModelSearch.aspx",
            "ModelNum",
        ),
        LinkTemplate::query(
            "Repair Clinic",
            "https://www.repairclinic.com/Shop-For-Parts",
            "modelNumber",
        ),
        LinkTemplate::query("Reliable Parts", "https://www.reliableparts.com/search", "q"),
        LinkTemplate::query(
            "Sears PartsDirect",
            "https://www.searspartsdirect.com/model-search.html",
            "q",
        ),
        LinkTemplate::query("Tribles", "https://www.tribles.com/search", "q"),
        LinkTemplate::query(
            "V&V Appliance Parts",
            "https://www.vvapplianceparts.com/ModelSearch.aspx",
            "ModelNumber",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceLink {
    pub label: String,
    pub url: String,
}

/// Resolves every catalog entry for `model`. A blank model has no links.
pub fn build_links(catalog: &[LinkTemplate], model: &str) -> Result<Vec<ReferenceLink>> {
    if model.trim().is_empty() {
        return Ok(Vec::new());
    }
    catalog
        .iter()
        .map(|template| {
            Ok(ReferenceLink {
                label: template.label.clone(),
                url: template.url_for(model)?.to_string(),
            })
        })
        .collect()
}

/// Visited flags for the links shown during one session, indexed like the
/// catalog. Owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSession {
    visited: Vec<bool>,
}

impl LinkSession {
    pub fn new(catalog_len: usize) -> Self {
        Self {
            visited: vec![false; catalog_len],
        }
    }

    /// Clears all flags if the catalog size changed since the last call.
    pub fn sync(&mut self, catalog_len: usize) {
        if self.visited.len() != catalog_len {
            self.visited = vec![false; catalog_len];
        }
    }

    pub fn mark_visited(&mut self, index: usize) {
        if let Some(flag) = self.visited.get_mut(index) {
            *flag = true;
        }
    }

    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.get(index).copied().unwrap_or(false)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }
}
