use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Вид узла дерева документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Текстовый узел
    Text,
    /// Секция CDATA
    #[strum(serialize = "cdata")]
    #[serde(rename = "cdata")]
    CData,
    /// Элемент
    Element,
    /// Комментарий
    Comment,
    /// Корень документа
    Document,
    /// Фрагмент документа
    DocumentFragment,
    Doctype,
    ProcessingInstruction,
}

impl NodeKind {
    /// Текст и CDATA несут символьные данные, которые читает усечение
    pub fn is_text_like(self) -> bool {
        matches!(self, NodeKind::Text | NodeKind::CData)
    }

    /// Всё, что не является текстом или комментарием
    pub fn is_structural(self) -> bool {
        !self.is_text_like() && self != NodeKind::Comment
    }

    /// Узлы, на которых останавливается подъём: у них нет родителя-элемента
    pub fn is_tree_root(self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::DocumentFragment)
    }
}

/// Форма возвращаемого результата усечения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
pub enum ReturnMode {
    /// Текст и последний структурный узел
    #[default]
    #[strum(serialize = "both")]
    #[serde(rename = "both")]
    Both,
    /// Только текст
    #[strum(serialize = "text")]
    #[serde(rename = "text")]
    TextOnly,
    /// Только узел
    #[strum(serialize = "node")]
    #[serde(rename = "node")]
    NodeOnly,
}

/// Настройки усечения текста
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct TruncationSettings {
    /// Резать только по пробельным символам
    #[builder(default = true)]
    pub word_safe: bool,
    /// Резать только после знака конца предложения
    #[builder(default = true)]
    pub sentence_safe: bool,
    /// Схлопывать последовательности пробелов в один
    #[builder(default = true)]
    pub truncate_whitespace: bool,
    #[builder(default)]
    pub return_mode: ReturnMode,
}

impl TruncationSettings {
    /// Настройки по умолчанию: все флаги включены, возвращаются текст и узел
    pub const DEFAULT: TruncationSettings = TruncationSettings {
        word_safe: true,
        sentence_safe: true,
        truncate_whitespace: true,
        return_mode: ReturnMode::Both,
    };

    /// Сколько символов оставить от начала найденной границы.
    ///
    /// В режиме слов разрез идёт перед разделителем, иначе знак конца
    /// предложения сохраняется. Правило действует и тогда, когда активен
    /// шаблон предложений.
    pub fn delimiter_offset(&self) -> usize {
        if self.word_safe { 0 } else { 1 }
    }

    pub fn with_return_mode(self, return_mode: ReturnMode) -> Self {
        Self { return_mode, ..self }
    }
}

impl Default for TruncationSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Результат усечения
#[derive(Debug, Clone, PartialEq)]
pub struct TruncationResult<N> {
    /// Усечённый (или полный, если граница не найдена) текст
    pub text: String,
    /// Последний посещённый структурный узел
    pub last_visited: Option<N>,
    /// `false`, если узлы закончились раньше, чем нашёлся разрез
    pub truncated: bool,
}

impl<N> TruncationResult<N> {
    /// Оставляет от результата то, что запрошено режимом `mode`
    pub fn shape(self, mode: ReturnMode) -> Truncated<N> {
        match mode {
            ReturnMode::Both => Truncated::Both(self),
            ReturnMode::TextOnly => Truncated::Text(self.text),
            ReturnMode::NodeOnly => Truncated::Node(self.last_visited),
        }
    }
}

/// Результат усечения в форме, заданной `ReturnMode`
#[derive(Debug, Clone, PartialEq)]
pub enum Truncated<N> {
    Both(TruncationResult<N>),
    Text(String),
    Node(Option<N>),
}

impl<N: Copy> Truncated<N> {
    pub fn text(&self) -> Option<&str> {
        match self {
            Truncated::Both(result) => Some(&result.text),
            Truncated::Text(text) => Some(text),
            Truncated::Node(_) => None,
        }
    }

    pub fn node(&self) -> Option<N> {
        match self {
            Truncated::Both(result) => result.last_visited,
            Truncated::Text(_) => None,
            Truncated::Node(node) => *node,
        }
    }
}

/// Сериализуемое описание узла, в котором прошёл разрез
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
}

/// Отчёт об усечении для вывода в JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutReport {
    pub text: String,
    pub truncated: bool,
    pub node: Option<NodeSummary>,
}

/// Формат входного документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Html,
    Xml,
}
