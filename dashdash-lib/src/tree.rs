use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub mod css_tree {
    use super::*;

    pub type NodeRef = Rc<RefCell<Node>>;
    pub type WeakNodeRef = Weak<RefCell<Node>>;

    #[derive(Debug)]
    pub enum Node {
        Root(RootNode),
        AtRule(AtRuleNode),
        Rule(RuleNode),
    }

    #[derive(Debug, Default)]
    pub struct RootNode {
        pub children: Vec<NodeRef>,
    }

    /// `@name params { ... }` or, without a block, `@name params;`.
    #[derive(Debug)]
    pub struct AtRuleNode {
        pub name: String,
        /// Raw prelude text, trimmed but otherwise exactly as written.
        pub params: String,
        pub children: Vec<NodeRef>,
        /// Only filled for at-rules whose body is a declaration list (`@font-face`, `@page`, ...).
        pub declarations: Vec<Declaration>,
        pub has_block: bool,
        pub parent: Option<WeakNodeRef>,
    }

    #[derive(Debug, Clone)]
    pub struct RuleNode {
        /// Never empty for rules coming out of the parser.
        pub selectors: Vec<String>,
        pub declarations: Vec<Declaration>,
        pub parent: Option<WeakNodeRef>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Declaration {
        pub property: String,
        pub value: String,
        pub important: bool,
    }

    #[derive(Debug)]
    pub struct Stylesheet {
        pub root: NodeRef,
    }

    impl AtRuleNode {
        pub fn new(name: impl Into<String>, params: impl Into<String>, has_block: bool) -> Self {
            AtRuleNode {
                name: name.into(),
                params: params.into(),
                children: Vec::new(),
                declarations: Vec::new(),
                has_block,
                parent: None,
            }
        }

        pub fn is_media(&self) -> bool {
            self.name.eq_ignore_ascii_case("media")
        }
    }

    impl RuleNode {
        pub fn new(selectors: Vec<String>) -> Self {
            RuleNode {
                selectors,
                declarations: Vec::new(),
                parent: None,
            }
        }

        pub fn with_declarations(mut self, declarations: Vec<Declaration>) -> Self {
            self.declarations = declarations;
            self
        }

        /// Parent container, if still attached.
        pub fn parent(&self) -> Option<NodeRef> {
            self.parent.as_ref().and_then(Weak::upgrade)
        }

        /// Selector list compared the way the merge step compares it.
        pub fn joined_selectors(&self) -> String {
            self.selectors.join(",")
        }
    }

    impl Declaration {
        pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
            Declaration {
                property: property.into(),
                value: value.into(),
                important: false,
            }
        }

        pub fn important(mut self, important: bool) -> Self {
            self.important = important;
            self
        }
    }

    impl Node {
        pub fn children(&self) -> Option<&Vec<NodeRef>> {
            match self {
                Node::Root(root) => Some(&root.children),
                Node::AtRule(at_rule) => Some(&at_rule.children),
                Node::Rule(_) => None,
            }
        }

        pub fn children_mut(&mut self) -> Option<&mut Vec<NodeRef>> {
            match self {
                Node::Root(root) => Some(&mut root.children),
                Node::AtRule(at_rule) => Some(&mut at_rule.children),
                Node::Rule(_) => None,
            }
        }

        pub fn parent(&self) -> Option<NodeRef> {
            let weak = match self {
                Node::Root(_) => return None,
                Node::AtRule(at_rule) => at_rule.parent.as_ref(),
                Node::Rule(rule) => rule.parent.as_ref(),
            };
            weak.and_then(Weak::upgrade)
        }

        fn set_parent(&mut self, parent: Option<WeakNodeRef>) {
            match self {
                Node::Root(_) => {}
                Node::AtRule(at_rule) => at_rule.parent = parent,
                Node::Rule(rule) => rule.parent = parent,
            }
        }

        pub fn as_rule(&self) -> Option<&RuleNode> {
            match self {
                Node::Rule(rule) => Some(rule),
                _ => None,
            }
        }

        pub fn as_rule_mut(&mut self) -> Option<&mut RuleNode> {
            match self {
                Node::Rule(rule) => Some(rule),
                _ => None,
            }
        }
    }

    pub fn new_stylesheet() -> Stylesheet {
        Stylesheet {
            root: Rc::new(RefCell::new(Node::Root(RootNode::default()))),
        }
    }

    pub fn new_node(node: Node) -> NodeRef {
        Rc::new(RefCell::new(node))
    }

    /// Appends `child` to `parent` and points the child's back-reference at it.
    /// Does nothing when `parent` cannot hold children.
    pub fn append_child(parent: &NodeRef, child: NodeRef) {
        let len = parent.borrow().children().map_or(0, Vec::len);
        insert_child(parent, len, child);
    }

    pub fn insert_child(parent: &NodeRef, index: usize, child: NodeRef) {
        let mut parent_node = parent.borrow_mut();
        if let Some(children) = parent_node.children_mut() {
            child.borrow_mut().set_parent(Some(Rc::downgrade(parent)));
            let index = index.min(children.len());
            children.insert(index, child);
        }
    }

    /// Detaches and returns the child at `index`, clearing its back-reference.
    pub fn remove_child(parent: &NodeRef, index: usize) -> Option<NodeRef> {
        let removed = {
            let mut parent_node = parent.borrow_mut();
            let children = parent_node.children_mut()?;
            if index >= children.len() {
                return None;
            }
            children.remove(index)
        };
        removed.borrow_mut().set_parent(None);
        Some(removed)
    }

    pub fn index_in_parent(parent: &NodeRef, child: &NodeRef) -> Option<usize> {
        parent
            .borrow()
            .children()?
            .iter()
            .position(|candidate| Rc::ptr_eq(candidate, child))
    }

    /// Removes `node` from its parent. Returns false if it was not attached.
    pub fn detach(node: &NodeRef) -> bool {
        let Some(parent) = node.borrow().parent() else {
            return false;
        };
        match index_in_parent(&parent, node) {
            Some(index) => remove_child(&parent, index).is_some(),
            None => false,
        }
    }

    /// Inserts `replacement` right after `node`, then removes `node`.
    /// Returns the inserted node, or `None` if `node` had no parent.
    pub fn replace_node(node: &NodeRef, replacement: Node) -> Option<NodeRef> {
        let parent = node.borrow().parent()?;
        let index = index_in_parent(&parent, node)?;
        let inserted = new_node(replacement);
        insert_child(&parent, index + 1, Rc::clone(&inserted));
        remove_child(&parent, index);
        Some(inserted)
    }

    /// True when both nodes hang off the very same container.
    pub fn same_parent(a: &NodeRef, b: &NodeRef) -> bool {
        match (a.borrow().parent(), b.borrow().parent()) {
            (Some(a_parent), Some(b_parent)) => Rc::ptr_eq(&a_parent, &b_parent),
            _ => false,
        }
    }

    /// Visits every style rule below `node` in document order, at any depth.
    pub fn walk_rules<F: FnMut(&NodeRef)>(node: &NodeRef, visit: &mut F) {
        let children = match node.borrow().children() {
            Some(children) => children.clone(),
            None => return,
        };
        for child in &children {
            let is_rule = matches!(&*child.borrow(), Node::Rule(_));
            if is_rule {
                visit(child);
            } else {
                walk_rules(child, visit);
            }
        }
    }

    /// Snapshot of every rule in document order.
    pub fn collect_rules(root: &NodeRef) -> Vec<NodeRef> {
        let mut rules = Vec::new();
        walk_rules(root, &mut |rule| rules.push(Rc::clone(rule)));
        rules
    }
}
