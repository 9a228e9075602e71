use indicatif::{MultiProgress, ProgressBar as InnerProgressBar, ProgressStyle};
use std::path::Path;

const TEMPLATE: &str = "{prefix:>.bold}\n[{bar:40.cyan/blue}] {pos}/{len}: {msg}";

#[derive(Debug, Clone)]
pub struct ProgressBar {
    inner: InnerProgressBar,
}

impl ProgressBar {
    pub fn new(mp: &MultiProgress, prefix: &str, len: usize) -> anyhow::Result<Self> {
        let inner = mp.add(InnerProgressBar::new(len as u64));

        inner.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE)?
                .progress_chars("=>"),
        );
        inner.set_prefix(prefix.to_string());

        inner.tick();

        Ok(Self { inner })
    }

    /// Marks `path` as done.
    pub fn advance(&self, path: &Path) {
        self.inner.set_message(path.display().to_string());
        self.inner.inc(1);
    }

    pub fn finish(&self) {
        self.inner.finish_and_clear();
    }
}
