//! 数组值
//!
//! `Array` 表达式求值后的字面量形式。排序规则：逐元素比较到较短长度为止，
//! NULL 排在非 NULL 之前，其余委托给常量排序使用的同一个比较器；
//! 公共前缀全部相等时较短的数组排在前面。下标基准只影响 `get`，
//! 不参与排序、相等和哈希。

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::comparison::ValueComparator;
use super::types::Value;
use crate::core::error::ExpressionResult;
use crate::core::types::DataType;

#[derive(Debug, Clone)]
pub struct ArrayValue {
    values: Vec<Value>,
    zero_based: bool,
}

impl ArrayValue {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            zero_based: false,
        }
    }

    /// 创建下标从 0 开始的数组值
    pub fn zero_based(values: Vec<Value>) -> Self {
        Self {
            values,
            zero_based: true,
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_zero_based(&self) -> bool {
        self.zero_based
    }

    /// 按 SQL 下标取值（默认从 1 开始）
    pub fn get(&self, index: usize) -> Option<&Value> {
        let offset = if self.zero_based {
            index
        } else {
            index.checked_sub(1)?
        };
        self.values.get(offset)
    }

    /// 元素类型：第一个非 NULL 元素的类型，全部为 NULL 时为 `object`
    pub fn component_type(&self) -> DataType {
        self.values
            .iter()
            .find(|v| !v.is_null())
            .map(Value::data_type)
            .unwrap_or(DataType::Object)
    }

    /// 使用全局比较器比较
    pub fn compare_to(&self, other: &ArrayValue) -> ExpressionResult<Ordering> {
        self.compare_with(other, &ValueComparator::global())
    }

    /// 使用指定比较器比较
    pub fn compare_with(
        &self,
        other: &ArrayValue,
        comparator: &ValueComparator,
    ) -> ExpressionResult<Ordering> {
        for (left, right) in self.values.iter().zip(other.values.iter()) {
            let ordering = match (left, right) {
                (Value::Null, Value::Null) => Ordering::Equal,
                (Value::Null, _) => Ordering::Less,
                (_, Value::Null) => Ordering::Greater,
                _ => comparator.compare(left, right)?,
            };
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
        Ok(self.values.len().cmp(&other.values.len()))
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for ArrayValue {}

impl Hash for ArrayValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl PartialOrd for ArrayValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare_to(other).ok()
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        if self.values.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i32]) -> ArrayValue {
        ArrayValue::new(values.iter().map(|v| Value::Integer(*v)).collect())
    }

    #[test]
    fn test_shorter_prefix_sorts_first() {
        let short = ints(&[1, 2]);
        let long = ints(&[1, 2, 3]);
        assert_eq!(short.compare_to(&long), Ok(Ordering::Less));
        assert_eq!(long.compare_to(&short), Ok(Ordering::Greater));
        assert!(short < long);
    }

    #[test]
    fn test_null_element_sorts_first() {
        let with_null = ArrayValue::new(vec![Value::Null, Value::Integer(5)]);
        let without = ints(&[0, 1]);
        assert_eq!(with_null.compare_to(&without), Ok(Ordering::Less));
    }

    #[test]
    fn test_element_difference_wins_over_length() {
        assert_eq!(ints(&[2]).compare_to(&ints(&[1, 9, 9])), Ok(Ordering::Greater));
    }

    #[test]
    fn test_incompatible_elements() {
        let a = ints(&[1]);
        let b = ArrayValue::new(vec![Value::String("1".into())]);
        assert!(a.compare_to(&b).is_err());
        assert_eq!(a.partial_cmp(&b), None);
    }

    #[test]
    fn test_index_base() {
        let one_based = ints(&[10, 20]);
        assert_eq!(one_based.get(1), Some(&Value::Integer(10)));
        assert_eq!(one_based.get(0), None);
        let zero_based = ArrayValue::zero_based(vec![Value::Integer(10)]);
        assert_eq!(zero_based.get(0), Some(&Value::Integer(10)));
        assert_eq!(one_based.compare_to(&zero_based), Ok(Ordering::Greater));
    }

    #[test]
    fn test_index_base_ignored_by_identity() {
        let one_based = ints(&[1, 2]);
        let zero_based = ArrayValue::zero_based(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(one_based.compare_to(&zero_based), Ok(Ordering::Equal));
        assert_eq!(one_based, zero_based);

        let mut set = std::collections::HashSet::new();
        set.insert(one_based);
        assert!(set.contains(&zero_based));
    }

    #[test]
    fn test_component_type() {
        let array = ArrayValue::new(vec![Value::Null, Value::Long(1)]);
        assert_eq!(array.component_type(), DataType::Long);
        assert_eq!(ArrayValue::new(vec![]).component_type(), DataType::Object);
    }
}
