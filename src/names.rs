/// The ordered names on the wheel.
///
/// A name has no identity beyond its position: removing one shifts every
/// later name down a slot, which also moves it to a different slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameList {
    entries: Vec<String>,
}

impl NameList {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Trims `text` and appends it. Blank input is ignored.
    pub fn add(&mut self, text: &str) -> bool {
        let name = text.trim();
        if name.is_empty() {
            return false;
        }

        log::debug!("adding '{name}' at {}", self.entries.len());
        self.entries.push(name.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.entries.len() {
            return None;
        }

        let name = self.entries.remove(index);
        log::debug!("removed '{name}' from {index}");
        Some(name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for name in iter {
            list.add(name.as_ref());
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::NameList;

    #[test]
    fn blank_names_are_ignored() {
        let mut names = NameList::new();
        assert!(!names.add(""));
        assert!(!names.add("   "));
        assert!(!names.add("\t\n"));
        assert!(names.is_empty());
    }

    #[test]
    fn names_are_trimmed() {
        let mut names = NameList::new();
        assert!(names.add("  Ali  "));
        assert_eq!(names.as_slice(), ["Ali"]);
    }

    #[test]
    fn remove_shifts_later_names() {
        let mut names = ["Ali", "Sara", "Omar", "Huda"]
            .into_iter()
            .collect::<NameList>();

        assert_eq!(names.remove(1).as_deref(), Some("Sara"));
        assert_eq!(names.len(), 3);
        assert_eq!(names.iter().collect::<Vec<_>>(), ["Ali", "Omar", "Huda"]);
        assert_eq!(names.get(1), Some("Omar"));
    }

    #[test]
    fn remove_out_of_range() {
        let mut names = ["Ali"].into_iter().collect::<NameList>();
        assert_eq!(names.remove(1), None);
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let names = ["Ali", "Ali", " Ali "].into_iter().collect::<NameList>();
        assert_eq!(names.len(), 3);
    }
}
