// Navigation state management.
// Tracks the drill-down from the items list into a single item.

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone)]
pub struct BreadcrumbNode {
    /// Display label for the breadcrumb.
    pub label: String,
    /// The view level this node represents.
    pub level: ViewLevel,
}

/// The current view level in the navigation hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLevel {
    /// Top level: the paginated, searchable items list
    Items,
    /// Detail view for one item
    Detail { id: u64, name: String },
}

impl ViewLevel {
    /// Get the display title for this view level.
    pub fn title(&self) -> String {
        match self {
            ViewLevel::Items => "Items".to_string(),
            ViewLevel::Detail { name, .. } => format!("{} / Details", name),
        }
    }

    /// Create a breadcrumb node for this view level.
    pub fn to_breadcrumb(&self) -> BreadcrumbNode {
        let label = match self {
            ViewLevel::Items => "Items".to_string(),
            ViewLevel::Detail { id, name } if name.is_empty() => format!("#{}", id),
            ViewLevel::Detail { name, .. } => name.clone(),
        };
        BreadcrumbNode {
            label,
            level: self.clone(),
        }
    }
}

/// Navigation stack. The root level is always present.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    root: ViewLevel,
    /// Levels above the root (bottom = first drill-down, top = current)
    stack: Vec<ViewLevel>,
}

impl NavigationStack {
    /// Create a new navigation stack starting at the given level.
    pub fn new(root: ViewLevel) -> Self {
        Self {
            root,
            stack: Vec::new(),
        }
    }

    /// Get the current view level.
    pub fn current(&self) -> &ViewLevel {
        self.stack.last().unwrap_or(&self.root)
    }

    /// Push a new view level onto the stack (drill down).
    pub fn push(&mut self, level: ViewLevel) {
        self.stack.push(level);
    }

    /// Pop the current view level (go back). Returns false if at root.
    pub fn pop(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    /// Get the breadcrumb trail.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        std::iter::once(&self.root)
            .chain(self.stack.iter())
            .map(|level| level.to_breadcrumb())
            .collect()
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(ViewLevel::Items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: u64, name: &str) -> ViewLevel {
        ViewLevel::Detail {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_navigation_stack() {
        let mut nav = NavigationStack::default();

        assert_eq!(nav.current(), &ViewLevel::Items);
        assert_eq!(nav.breadcrumbs().len(), 1);

        nav.push(detail(2, "Headphones"));
        assert_eq!(nav.breadcrumbs().len(), 2);
        assert_eq!(nav.current().title(), "Headphones / Details");

        assert!(nav.pop());
        assert_eq!(nav.current(), &ViewLevel::Items);

        // Can't pop past root
        assert!(!nav.pop());
        assert_eq!(nav.breadcrumbs().len(), 1);
    }

    #[test]
    fn test_breadcrumbs() {
        let mut nav = NavigationStack::default();
        nav.push(detail(1, "Laptop Pro"));

        let breadcrumbs = nav.breadcrumbs();
        assert_eq!(breadcrumbs.len(), 2);
        assert_eq!(breadcrumbs[0].label, "Items");
        assert_eq!(breadcrumbs[1].label, "Laptop Pro");

        assert!(nav.pop());
        nav.push(detail(42, ""));
        assert_eq!(nav.breadcrumbs()[1].label, "#42");
    }
}
