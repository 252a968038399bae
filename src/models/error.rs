use derive_more::{Display, Error};

/// Ошибки библиотеки усечения
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TruncateError {
    /// Селектор не удалось разобрать
    #[display("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
    /// Имя тега в настройках не является именем элемента
    #[display("invalid tag name for {field}: `{value}`")]
    InvalidTagName { field: &'static str, value: String },
    /// Входной XML не разобран
    #[display("malformed xml: {reason}")]
    MalformedXml { reason: String },
}

impl TruncateError {
    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        TruncateError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Ошибки конфигурации исправляются изменением входных настроек
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TruncateError::InvalidSelector { .. } | TruncateError::InvalidTagName { .. }
        )
    }
}
