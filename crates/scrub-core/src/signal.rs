use serde::{Serialize, Serializer};

use crate::Category;

/// Categories detected as present and valid in one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalSet(u16);

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn bit(category: Category) -> u16 {
        1 << (category as u16)
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= Self::bit(category);
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0 & Self::bit(category) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }

    /// Full name, or given and family name together
    pub fn identity(&self) -> bool {
        self.contains(Category::FullName)
            || (self.contains(Category::GivenName) && self.contains(Category::FamilyName))
    }

    pub fn email(&self) -> bool {
        self.contains(Category::Email)
    }

    pub fn address(&self) -> bool {
        self.contains(Category::Address)
    }

    pub fn device_or_network(&self) -> bool {
        self.contains(Category::DeviceId) || self.contains(Category::IpAddress)
    }
}

impl FromIterator<Category> for SignalSet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = SignalSet::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl Serialize for SignalSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
