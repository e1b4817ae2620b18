use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown admin page '{0}'")]
pub struct UnknownPage(pub String);

/// The admin dashboard's list pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminPage {
    Menu,
    Branches,
    Bookings,
    Employees,
    Roles,
    Schedules,
}

impl AdminPage {
    pub fn all() -> &'static [AdminPage] {
        &[
            Self::Menu,
            Self::Branches,
            Self::Bookings,
            Self::Employees,
            Self::Roles,
            Self::Schedules,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Branches => "branches",
            Self::Bookings => "bookings",
            Self::Employees => "employees",
            Self::Roles => "roles",
            Self::Schedules => "schedules",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Branches => "Branches",
            Self::Bookings => "Bookings",
            Self::Employees => "Employees",
            Self::Roles => "Roles",
            Self::Schedules => "Schedules",
        }
    }

    pub fn resource(&self) -> &'static str {
        match self {
            Self::Menu => crate::menu::RESOURCE,
            Self::Branches => crate::branch::RESOURCE,
            Self::Bookings => crate::booking::RESOURCE,
            Self::Employees => crate::employee::RESOURCE,
            Self::Roles => crate::role::RESOURCE,
            Self::Schedules => crate::schedule::RESOURCE,
        }
    }
}

impl fmt::Display for AdminPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AdminPage {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let page = match s.trim().to_ascii_lowercase().as_str() {
            "menu" | "menu-items" | "dishes" => Self::Menu,
            "branch" | "branches" => Self::Branches,
            "booking" | "bookings" | "reservations" => Self::Bookings,
            "employee" | "employees" | "staff" => Self::Employees,
            "role" | "roles" => Self::Roles,
            "schedule" | "schedules" | "shifts" => Self::Schedules,
            _ => return Err(UnknownPage(s.to_string())),
        };
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_parse_back() {
        for page in AdminPage::all() {
            assert_eq!(page.slug().parse::<AdminPage>(), Ok(*page));
        }
    }

    #[test]
    fn test_aliases_and_unknown() {
        assert_eq!("Staff".parse::<AdminPage>(), Ok(AdminPage::Employees));
        assert_eq!(" booking ".parse::<AdminPage>(), Ok(AdminPage::Bookings));
        assert_eq!(
            "orders".parse::<AdminPage>(),
            Err(UnknownPage("orders".into()))
        );
    }
}
