//! Install priority classes
//!
//! Units are applied class by class: backend services first (everything
//! else may call into them), then engine artifacts in dependency order,
//! pages last because they reference widgets and page templates. Within a
//! class the manifest order is preserved, so ordering is deterministic for
//! identical input.

use std::cmp::Reverse;

use crate::domain::ComponentKind;
use crate::engine::unit::InstallableUnit;

/// Priority class of a component kind; lower ranks install first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstallPriority(u8);

impl InstallPriority {
    pub fn of(kind: ComponentKind) -> Self {
        let rank = match kind {
            ComponentKind::Service => 0,
            ComponentKind::Directory => 1,
            ComponentKind::Label => 2,
            ComponentKind::Asset => 3,
            ComponentKind::Widget => 4,
            ComponentKind::ContentType => 5,
            ComponentKind::ContentTemplate => 6,
            ComponentKind::Fragment => 7,
            ComponentKind::PageTemplate => 8,
            ComponentKind::Page => 9,
        };
        Self(rank)
    }

    pub fn rank(&self) -> u8 {
        self.0
    }
}

/// Sort units into install order
///
/// The sort is stable: units of the same class keep their relative
/// (manifest) order.
pub fn order_for_install(units: &mut [InstallableUnit]) {
    units.sort_by_key(|unit| unit.priority);
}

/// Sort units into uninstall order, the reverse of install order
pub fn order_for_uninstall(units: &mut [InstallableUnit]) {
    units.sort_by_key(|unit| Reverse(unit.priority));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_first_pages_last() {
        assert!(
            InstallPriority::of(ComponentKind::Service) < InstallPriority::of(ComponentKind::Page)
        );
        assert_eq!(InstallPriority::of(ComponentKind::Service).rank(), 0);
        assert_eq!(InstallPriority::of(ComponentKind::Page).rank(), 9);
    }

    #[test]
    fn test_ranks_follow_declared_kind_order() {
        let ranks: Vec<u8> = ComponentKind::ALL
            .iter()
            .map(|kind| InstallPriority::of(*kind).rank())
            .collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn test_widgets_before_page_templates() {
        assert!(
            InstallPriority::of(ComponentKind::Widget)
                < InstallPriority::of(ComponentKind::PageTemplate)
        );
    }
}
