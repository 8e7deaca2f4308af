//! Raw record → public plugin projection.

use plugboard_core::PluginId;

use crate::model::Plugin;
use crate::raw::{RawPluginRecord, fields};
use crate::sanitize::{Sanitizer, TagStripper};

/// Projects raw records; total over any input.
#[derive(Debug, Clone, Default)]
pub struct Projector<S = TagStripper> {
    sanitizer: S,
}

impl Projector<TagStripper> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Sanitizer> Projector<S> {
    pub fn with_sanitizer(sanitizer: S) -> Self {
        Self { sanitizer }
    }

    /// Build the public shape of `raw` under the inventory key `id`.
    ///
    /// `status` is always left empty here; bucket-specific annotation is the
    /// assembler's job.
    pub fn project(&self, raw: &RawPluginRecord, id: &PluginId) -> Plugin {
        let clean = |key: &str| self.sanitizer.strip_markup(&raw.text(key));

        Plugin {
            id: PluginId::new(self.sanitizer.strip_markup(id.as_str())),
            name: clean(fields::NAME),
            description: clean(fields::DESCRIPTION),
            version: clean(fields::VERSION),
            link: clean(fields::PLUGIN_URI),
            author: clean(fields::AUTHOR),
            author_url: clean(fields::AUTHOR_URI),
            textdomain: clean(fields::TEXT_DOMAIN),
            textdomain_path: clean(fields::DOMAIN_PATH),
            network_only: raw.flag(fields::NETWORK),
            status: None,
        }
    }
}
