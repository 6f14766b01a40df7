/// Three-state update for an optional field.
///
/// Partial updates need to distinguish "leave this field alone" from
/// "set it to None"; an `Option<Option<T>>` makes that distinction easy
/// to get wrong, so it is spelled out:
/// - `NoChange` keeps the existing value
/// - `Set(value)` overwrites it
/// - `Clear` sets it to `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some` becomes `Set`, `None` becomes `Clear`. Useful at boundaries
    /// where absence already means "clear it".
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
