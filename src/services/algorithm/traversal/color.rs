//! 三色标记

use std::fmt;

/// 遍历中顶点的颜色
///
/// 白色：未发现；灰色：已发现但边未处理完；黑色：已完成。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphColor {
    #[default]
    White,
    Gray,
    Black,
}

impl GraphColor {
    pub fn description(&self) -> &'static str {
        match self {
            GraphColor::White => "未发现",
            GraphColor::Gray => "已发现",
            GraphColor::Black => "已完成",
        }
    }
}

impl fmt::Display for GraphColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
