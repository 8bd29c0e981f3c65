use indexmap::IndexMap;

/// The values bound to one responsive property.
///
/// `inputs` maps input keys to values: the plain `base_key` (`"layout"`) holds the
/// value used when no breakpoint specific key wins, and suffixed keys
/// (`"layoutGtSm"`) hold breakpoint specific values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyOptions<V> {
    base_key: String,
    default_value: Option<V>,
    inputs: IndexMap<String, V>,
}

impl<V> KeyOptions<V> {
    pub fn new(base_key: impl Into<String>) -> Self {
        Self {
            base_key: base_key.into(),
            default_value: None,
            inputs: IndexMap::new(),
        }
    }

    /// Sets the value of the unsuffixed base key.
    pub fn base(mut self, value: V) -> Self {
        self.inputs.insert(self.base_key.clone(), value);
        self
    }

    pub fn input(mut self, key: impl Into<String>, value: V) -> Self {
        self.inputs.insert(key.into(), value);
        self
    }

    pub fn inputs(mut self, inputs: impl IntoIterator<Item = (String, V)>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    /// Used when the base key itself has no input.
    pub fn default_value(mut self, value: V) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn base_key(&self) -> &str {
        &self.base_key
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.inputs.get(key)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.inputs.contains_key(key)
    }

    pub fn has_base_input(&self) -> bool {
        self.inputs.contains_key(&self.base_key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub(crate) fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.inputs.insert(key.into(), value)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        self.inputs.shift_remove(key)
    }
}

impl<V: Clone> KeyOptions<V> {
    /// The value `key` stands for. The base key falls back to the default value.
    pub fn resolve(&self, key: &str) -> Option<V> {
        match self.inputs.get(key) {
            Some(value) => Some(value.clone()),
            None if key == self.base_key => self.default_value.clone(),
            None => None,
        }
    }
}
