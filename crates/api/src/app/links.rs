/// Builds absolute URLs for response links from the configured public base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    pub fn new(public_url: impl Into<String>) -> Self {
        let mut base = public_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    pub fn collection(&self) -> String {
        self.absolute_url("/plugins")
    }

    pub fn item(&self, id: &str) -> String {
        self.absolute_url(&format!("/plugins/{id}"))
    }
}
