//! Navigation - Pages and Role Guard
//!
//! Every command belongs to a page. The guard decides whether the current
//! session may open it, mirroring where a visitor would be redirected.

use serde::{Deserialize, Serialize};

use crate::domain::auth::{Role, Session};

/// Available pages in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Page {
    /// Totals and recent tickets
    #[default]
    Dashboard,
    /// Staff roster (admin only)
    Employees,
    /// Rooms and assignments
    Accommodations,
    /// Repair tickets
    Maintenance,
    /// Charts (admin only)
    Statistics,
    /// Sign-in
    Login,
}

impl Page {
    /// Get the translation key for the page title
    pub fn title_key(&self) -> &'static str {
        match self {
            Page::Dashboard => "page.dashboard",
            Page::Employees => "page.employees",
            Page::Accommodations => "page.accommodations",
            Page::Maintenance => "page.maintenance",
            Page::Statistics => "page.statistics",
            Page::Login => "page.login",
        }
    }

    /// Route path
    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Employees => "/employees",
            Page::Accommodations => "/accommodations",
            Page::Maintenance => "/maintenance",
            Page::Statistics => "/statistics",
            Page::Login => "/login",
        }
    }

    /// Roles allowed to open the page. Empty means public.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Page::Employees | Page::Statistics => &[Role::Admin],
            Page::Dashboard | Page::Accommodations | Page::Maintenance => &[Role::Admin, Role::Staff],
            Page::Login => &[],
        }
    }

    /// Pages shown in the navigation menu
    pub fn all() -> &'static [Page] {
        &[
            Page::Dashboard,
            Page::Employees,
            Page::Accommodations,
            Page::Maintenance,
            Page::Statistics,
        ]
    }

    /// Menu pages the role may open
    pub fn visible_for(role: Role) -> Vec<Page> {
        Self::all()
            .iter()
            .copied()
            .filter(|p| p.allowed_roles().contains(&role))
            .collect()
    }
}

/// Guard decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No session: go to the login page
    RedirectToLogin,
    /// Logged in with the wrong role: back to the dashboard
    RedirectToDashboard,
}

/// Decide whether `session` may open `page`
pub fn guard(session: Option<&Session>, page: Page) -> Access {
    let allowed = page.allowed_roles();
    if allowed.is_empty() {
        return Access::Granted;
    }
    match session {
        None => Access::RedirectToLogin,
        Some(session) if allowed.contains(&session.role) => Access::Granted,
        Some(_) => Access::RedirectToDashboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_matrix() {
        let admin = Session::new("admin", Role::Admin);
        let staff = Session::new("clerk", Role::Staff);

        for page in Page::all() {
            assert_eq!(guard(None, *page), Access::RedirectToLogin);
            assert_eq!(guard(Some(&admin), *page), Access::Granted);
        }

        assert_eq!(guard(Some(&staff), Page::Dashboard), Access::Granted);
        assert_eq!(guard(Some(&staff), Page::Accommodations), Access::Granted);
        assert_eq!(guard(Some(&staff), Page::Maintenance), Access::Granted);
        assert_eq!(guard(Some(&staff), Page::Employees), Access::RedirectToDashboard);
        assert_eq!(guard(Some(&staff), Page::Statistics), Access::RedirectToDashboard);
        assert_eq!(guard(None, Page::Login), Access::Granted);
    }

    #[test]
    fn test_visible_pages() {
        assert_eq!(Page::visible_for(Role::Admin).len(), 5);
        assert_eq!(
            Page::visible_for(Role::Staff),
            [Page::Dashboard, Page::Accommodations, Page::Maintenance]
        );
    }
}
