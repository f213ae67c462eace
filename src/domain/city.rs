// Supported city set - the only authority on valid city names

/// Cities covered by the CWA 36-hour forecast dataset, in the order
/// they are presented to clients.
pub const DEFAULT_CITIES: [&str; 22] = [
    "臺北市",
    "新北市",
    "桃園市",
    "臺中市",
    "臺南市",
    "高雄市",
    "基隆市",
    "新竹市",
    "新竹縣",
    "苗栗縣",
    "彰化縣",
    "南投縣",
    "雲林縣",
    "嘉義市",
    "嘉義縣",
    "屏東縣",
    "宜蘭縣",
    "花蓮縣",
    "臺東縣",
    "澎湖縣",
    "金門縣",
    "連江縣",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedCities {
    names: Vec<String>,
}

impl SupportedCities {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact membership test. Input is not trimmed or case folded.
    pub fn is_supported(&self, name: &str) -> bool {
        self.names.iter().any(|city| city == name)
    }

    /// Split names into (valid, invalid), each keeping input order.
    pub fn partition<S: AsRef<str>>(&self, names: &[S]) -> (Vec<String>, Vec<String>) {
        names
            .iter()
            .map(|name| name.as_ref().to_string())
            .partition(|name| self.is_supported(name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl Default for SupportedCities {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES)
    }
}
