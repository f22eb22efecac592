//! 自定义断言辅助模块
//!
//! 提供测试中的常用断言函数

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// 断言结果成功，返回内部值
pub fn assert_ok<T, E: Debug>(result: Result<T, E>) -> T {
    result.expect("操作应该成功")
}

/// 断言结果失败并匹配错误消息
pub fn assert_err_with<T: Debug, E: std::fmt::Display>(result: Result<T, E>, expected_msg: &str) {
    let err = result.expect_err("操作应该失败");
    let err_str = err.to_string();
    assert!(
        err_str.contains(expected_msg),
        "错误消息应包含 '{}', 实际是 '{}'",
        expected_msg,
        err_str
    );
}

/// 断言两个距离表一致；无穷大只与无穷大相等
pub fn assert_same_distances<V: Eq + Hash + Debug>(
    left: &HashMap<V, f64>,
    right: &HashMap<V, f64>,
    what: &str,
) {
    assert_eq!(left.len(), right.len(), "{}顶点数不匹配", what);
    for (vertex, expected) in left {
        let actual = right
            .get(vertex)
            .unwrap_or_else(|| panic!("{}缺少顶点 {:?}", what, vertex));
        let same = (expected.is_infinite() && actual.is_infinite() && expected == actual)
            || (expected - actual).abs() < 1e-9;
        assert!(
            same,
            "{}在顶点 {:?} 不一致: 期望 {}, 实际 {}",
            what, vertex, expected, actual
        );
    }
}
