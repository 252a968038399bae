use std::hash::Hash;

use crate::models::error::TruncateError;
use crate::models::types::NodeKind;

/// Общий интерфейс узла дерева документа, которым владеет внешний код.
///
/// Реализации являются дешёвыми копируемыми ссылками на узел; ссылка на
/// родителя не владеет им и используется только для подъёма по дереву.
pub trait TreeNode: Copy {
    /// Идентичность узла внутри одного дерева
    type Id: Copy + Eq + Hash;

    fn id(&self) -> Self::Id;

    fn kind(&self) -> NodeKind;

    fn parent(&self) -> Option<Self>;

    fn first_child(&self) -> Option<Self>;

    fn next_sibling(&self) -> Option<Self>;

    /// Сырые символьные данные текстового узла или CDATA
    fn character_data(&self) -> Option<&str>;

    /// Локальное имя элемента
    fn local_name(&self) -> Option<&str>;

    /// Дочерние узлы в порядке документа
    fn children(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.first_child(), |node| node.next_sibling())
    }

    /// Следующие соседи, без самого узла
    fn next_siblings(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.next_sibling(), |node| node.next_sibling())
    }

    fn same_node(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Сопоставление узла со строковым селектором, который понимает хост.
pub trait SelectorMatch: TreeNode {
    /// Разобранный селектор
    type Compiled;

    /// Разбирает селектор один раз перед обходом; ошибка разбора является ошибкой конфигурации.
    fn compile(selector: &str) -> Result<Self::Compiled, TruncateError>;

    fn matches(&self, compiled: &Self::Compiled) -> bool;
}
