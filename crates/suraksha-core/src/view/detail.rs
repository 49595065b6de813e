// ── Detail-panel pointer ──

/// Zero or one record shown in a detail panel.
///
/// Starts empty. Selecting replaces unconditionally; selecting the
/// record already shown keeps it shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail<T> {
    current: Option<T>,
}

impl<T> Default for Detail<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> Detail<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, record: T) {
        self.current = Some(record);
    }

    pub fn get(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let detail: Detail<u32> = Detail::new();
        assert!(!detail.is_open());
        assert_eq!(detail.get(), None);
    }

    #[test]
    fn select_replaces_and_reselect_keeps() {
        let mut detail = Detail::new();
        detail.select("JOB001");
        detail.select("JOB002");
        assert_eq!(detail.get(), Some(&"JOB002"));

        detail.select("JOB002");
        assert_eq!(detail.get(), Some(&"JOB002"));

        detail.clear();
        assert!(!detail.is_open());
    }
}
