//! Screen identifiers.

use std::fmt;

use shoely_core::Route;

/// Identifies each TUI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    ShoeList,
    /// Opened with `a` from the list.
    AddShoe,
    /// Opened with `e` / Enter from the list.
    EditShoe,
}

impl ScreenId {
    /// Screen that displays a navigation destination.
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::AddShoe => Self::AddShoe,
            Route::EditShoe(_) => Self::EditShoe,
        }
    }

    /// Forms capture every key except Ctrl+C.
    pub fn is_form(self) -> bool {
        matches!(self, Self::AddShoe | Self::EditShoe)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShoeList => "Shoes",
            Self::AddShoe => "Add shoe",
            Self::EditShoe => "Edit shoe",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoely_core::{Product, ProductId};

    #[test]
    fn routes_map_to_form_screens() {
        let product = Product {
            id: ProductId::from("1"),
            name: "Air".into(),
            code: "A1".into(),
            price: 100.0,
            size: "42".into(),
        };
        assert_eq!(ScreenId::for_route(&Route::AddShoe), ScreenId::AddShoe);
        assert_eq!(ScreenId::for_route(&Route::EditShoe(product)), ScreenId::EditShoe);
        assert!(ScreenId::EditShoe.is_form());
        assert!(!ScreenId::ShoeList.is_form());
    }
}
