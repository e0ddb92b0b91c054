//! 表达式树遍历
//!
//! 提供表达式树的遍历和改写方法。子表达式包括谓词、排序项、窗口规格
//! 和派生列中出现的表达式，但不进入子查询命令。

use super::criteria::Criteria;
use super::def::Expression;
use super::AbstractCaseExpression;

impl Criteria {
    /// 谓词中直接出现的表达式
    pub fn expressions(&self) -> Vec<&Expression> {
        match self {
            Criteria::Compare(c) => vec![&c.left, &c.right],
            Criteria::IsNull(c) => vec![&c.expression],
            Criteria::Compound(c) => c.criteria.iter().flat_map(Criteria::expressions).collect(),
            Criteria::Not(c) => c.criteria.expressions(),
            Criteria::Expression(c) => vec![&c.expression],
        }
    }

    pub fn expressions_mut(&mut self) -> Vec<&mut Expression> {
        match self {
            Criteria::Compare(c) => vec![&mut c.left, &mut c.right],
            Criteria::IsNull(c) => vec![&mut c.expression],
            Criteria::Compound(c) => c
                .criteria
                .iter_mut()
                .flat_map(Criteria::expressions_mut)
                .collect(),
            Criteria::Not(c) => c.criteria.expressions_mut(),
            Criteria::Expression(c) => vec![&mut c.expression],
        }
    }
}

impl Expression {
    /// 获取表达式的所有子表达式
    ///
    /// 返回一个包含所有直接子表达式的向量，顺序与渲染顺序一致。
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Constant(_)
            | Expression::ElementSymbol(_)
            | Expression::Reference(_)
            | Expression::MultipleElementSymbol(_)
            | Expression::ScalarSubquery(_) => vec![],
            Expression::Function(function) => function.args().iter().collect(),
            Expression::AggregateSymbol(aggregate) => {
                let mut children: Vec<&Expression> = aggregate.expression().into_iter().collect();
                if let Some(order_by) = aggregate.order_by() {
                    children.extend(order_by.items().iter().map(|item| &item.expression));
                }
                if let Some(condition) = aggregate.condition() {
                    children.extend(condition.expressions());
                }
                children
            }
            Expression::WindowFunction(window) => {
                // 聚合本身不是独立的表达式节点，直接取它的子节点
                let function = window.function();
                let mut children: Vec<&Expression> = function.expression().into_iter().collect();
                if let Some(order_by) = function.order_by() {
                    children.extend(order_by.items().iter().map(|item| &item.expression));
                }
                if let Some(condition) = function.condition() {
                    children.extend(condition.expressions());
                }
                let specification = window.window_specification();
                children.extend(specification.partition.iter());
                if let Some(order_by) = &specification.order_by {
                    children.extend(order_by.items().iter().map(|item| &item.expression));
                }
                children
            }
            Expression::Array(array) => array.expressions().iter().collect(),
            Expression::CaseExpression(case) => {
                let mut children = vec![case.expression()];
                for (when, then) in case.when().iter().zip(case.then_expressions()) {
                    children.push(when);
                    children.push(then);
                }
                children.extend(case.else_expression());
                children
            }
            Expression::SearchedCaseExpression(case) => {
                let mut children = Vec::new();
                for (when, then) in case.when().iter().zip(case.then_expressions()) {
                    children.extend(when.expressions());
                    children.push(then);
                }
                children.extend(case.else_expression());
                children
            }
            Expression::AliasSymbol(alias) => vec![alias.symbol()],
            Expression::ExpressionSymbol(symbol) => vec![symbol.expression()],
            Expression::XmlElement(element) => {
                let mut children: Vec<&Expression> = element
                    .attributes
                    .iter()
                    .flat_map(|attributes| attributes.args.iter().map(|arg| arg.expression()))
                    .collect();
                children.extend(element.content.iter());
                children
            }
            Expression::XmlForest(forest) => {
                forest.args.iter().map(|arg| arg.expression()).collect()
            }
            Expression::XmlQuery(query) => {
                query.passing.iter().map(|arg| arg.expression()).collect()
            }
            Expression::XmlCast(cast) => vec![cast.expression.as_ref()],
            Expression::XmlParse(parse) => vec![parse.expression.as_ref()],
            Expression::XmlSerialize(serialize) => vec![serialize.expression.as_ref()],
            Expression::XmlExists(exists) => exists
                .xml_query
                .passing
                .iter()
                .map(|arg| arg.expression())
                .collect(),
        }
    }

    /// 获取可变子表达式
    ///
    /// 与 `children` 覆盖相同的节点。
    pub fn children_mut(&mut self) -> Vec<&mut Expression> {
        match self {
            Expression::Constant(_)
            | Expression::ElementSymbol(_)
            | Expression::Reference(_)
            | Expression::MultipleElementSymbol(_)
            | Expression::ScalarSubquery(_) => vec![],
            Expression::Function(function) => function.args_mut().iter_mut().collect(),
            Expression::AggregateSymbol(aggregate) => aggregate.children_mut(),
            Expression::WindowFunction(window) => window.children_mut(),
            Expression::Array(array) => array.expressions_mut().iter_mut().collect(),
            Expression::CaseExpression(case) => case.children_mut(),
            Expression::SearchedCaseExpression(case) => case.children_mut(),
            Expression::AliasSymbol(alias) => vec![alias.symbol_mut()],
            Expression::ExpressionSymbol(symbol) => vec![symbol.expression_mut()],
            Expression::XmlElement(element) => {
                let mut children: Vec<&mut Expression> = element
                    .attributes
                    .iter_mut()
                    .flat_map(|attributes| {
                        attributes.args.iter_mut().map(|arg| arg.expression_mut())
                    })
                    .collect();
                children.extend(element.content.iter_mut());
                children
            }
            Expression::XmlForest(forest) => forest
                .args
                .iter_mut()
                .map(|arg| arg.expression_mut())
                .collect(),
            Expression::XmlQuery(query) => query
                .passing
                .iter_mut()
                .map(|arg| arg.expression_mut())
                .collect(),
            Expression::XmlCast(cast) => vec![cast.expression.as_mut()],
            Expression::XmlParse(parse) => vec![parse.expression.as_mut()],
            Expression::XmlSerialize(serialize) => vec![serialize.expression.as_mut()],
            Expression::XmlExists(exists) => exists
                .xml_query
                .passing
                .iter_mut()
                .map(|arg| arg.expression_mut())
                .collect(),
        }
    }

    /// 遍历表达式树（前序遍历）
    pub fn traverse_preorder<F>(&self, callback: &mut F)
    where
        F: FnMut(&Expression),
    {
        callback(self);
        for child in self.children() {
            child.traverse_preorder(callback);
        }
    }

    /// 遍历表达式树（后序遍历）
    pub fn traverse_postorder<F>(&self, callback: &mut F)
    where
        F: FnMut(&Expression),
    {
        for child in self.children() {
            child.traverse_postorder(callback);
        }
        callback(self);
    }

    /// 查找满足条件的表达式
    ///
    /// 前序查找第一个满足条件的表达式。
    pub fn find<F>(&self, predicate: &F) -> Option<&Expression>
    where
        F: Fn(&Expression) -> bool,
    {
        if predicate(self) {
            return Some(self);
        }
        self.children()
            .into_iter()
            .find_map(|child| child.find(predicate))
    }

    /// 查找所有满足条件的表达式
    pub fn find_all<'a, F>(&'a self, predicate: &F, results: &mut Vec<&'a Expression>)
    where
        F: Fn(&Expression) -> bool,
    {
        if predicate(self) {
            results.push(self);
        }
        for child in self.children() {
            child.find_all(predicate, results);
        }
    }

    /// 原地改写表达式树（后序）
    ///
    /// 先改写子节点再改写当前节点，回调可以整体替换节点。
    pub fn rewrite<F>(&mut self, rewriter: &mut F)
    where
        F: FnMut(&mut Expression),
    {
        for child in self.children_mut() {
            child.rewrite(rewriter);
        }
        rewriter(self);
    }

    /// 转换表达式树
    ///
    /// 转换器对某个节点返回 `Some` 时用结果替换整棵子树，否则递归转换子节点。
    pub fn transform<F>(&self, transformer: &F) -> Expression
    where
        F: Fn(&Expression) -> Option<Expression>,
    {
        if let Some(transformed) = transformer(self) {
            return transformed;
        }
        let mut result = self.clone();
        for child in result.children_mut() {
            *child = child.transform(transformer);
        }
        result
    }
}
