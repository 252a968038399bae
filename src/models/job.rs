use std::path::PathBuf;

use bon::Builder;
use strum::{Display, EnumString};

use crate::models::types::{DocumentFormat, ReturnMode};

/// Действие, выполняемое над документом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    /// Вывести усечённый текст и/или узел разреза
    Truncate,
    /// Свернуть скрытую часть документа под переключателем
    Collapse,
}

/// Задание для одного входного документа
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Job {
    pub action: Action,
    pub input: PathBuf,
    pub min_length: usize,
    /// Корни для обработки; по умолчанию `body` или корневой элемент
    pub selector: Option<String>,
    #[builder(default)]
    pub format: DocumentFormat,
    /// Переопределяет `truncate.return_mode` из конфигурации
    pub return_mode: Option<ReturnMode>,
    /// Если не задан, результат печатается в stdout
    pub output: Option<PathBuf>,
}
