//! Page fixtures built on [`MemoryHost`].

use qwantum_dom::{Host, MemoryHost, NodeId};

/// Append an element carrying an `id` attribute.
pub fn element_with_id(
    host: &MemoryHost,
    parent: &NodeId,
    tag: &str,
    classes: &[&str],
    id: &str,
) -> NodeId {
    let node = host.append_element(parent, tag, classes);
    host.set_attribute(&node, "id", id);
    node
}

/// Marketing page with two dialogs, their triggers, a mobile menu and
/// animated sections. No backdrop is present; the controller creates one.
#[derive(Debug, Clone)]
pub struct LandingPage {
    /// Document.
    pub host: MemoryHost,
    /// `#signup` dialog root.
    pub signup: NodeId,
    /// Content panel inside `#signup`.
    pub signup_content: NodeId,
    /// Close control inside `#signup`.
    pub signup_close: NodeId,
    /// `#login` dialog root (no close control).
    pub login: NodeId,
    /// Dialog root without an id; never registered.
    pub anonymous: NodeId,
    /// Link opening `#signup`.
    pub signup_trigger: NodeId,
    /// Button opening `#login`.
    pub login_trigger: NodeId,
    /// Trigger naming a dialog that does not exist.
    pub dangling_trigger: NodeId,
    /// Burger button.
    pub burger: NodeId,
    /// Mobile navigation panel.
    pub nav: NodeId,
    /// Links inside the mobile panel.
    pub nav_links: Vec<NodeId>,
    /// Sections tagged for the reveal animation.
    pub animated: Vec<NodeId>,
}

/// Build the [`LandingPage`] fixture.
#[must_use]
pub fn landing_page() -> LandingPage {
    let host = MemoryHost::new();
    let body = host.body();

    let header = host.append_element(&body, "header", &["qw-header"]);
    let burger = host.append_element(&header, "button", &["qw-burger"]);
    let nav = host.append_element(&header, "nav", &["qw-nav-mobile"]);
    let nav_links = ["#features", "#pricing", "#contact"]
        .iter()
        .map(|href| {
            let link = host.append_element(&nav, "a", &["qw-nav_link"]);
            host.set_attribute(&link, "href", href);
            link
        })
        .collect();

    let hero = host.append_element(&body, "section", &["qw-hero"]);
    let signup_trigger = host.append_element(&hero, "a", &["qw-btn"]);
    host.set_attribute(&signup_trigger, "href", "#");
    host.set_attribute(&signup_trigger, "data-qw-modal", "signup");
    let login_trigger = host.append_element(&hero, "button", &["qw-btn"]);
    host.set_attribute(&login_trigger, "data-qw-modal", "login");
    let dangling_trigger = host.append_element(&hero, "button", &["qw-btn"]);
    host.set_attribute(&dangling_trigger, "data-qw-modal", "missing");

    let animated = (0..3)
        .map(|_| host.append_element(&body, "section", &["qw-animate-fade-up"]))
        .collect();

    let signup = element_with_id(&host, &body, "div", &["qw-modal"], "signup");
    let signup_content = host.append_element(&signup, "div", &["qw-modal_content"]);
    let signup_close = host.append_element(&signup_content, "button", &["qw-modal_close"]);
    let login = element_with_id(&host, &body, "div", &["qw-modal"], "login");
    let _ = host.append_element(&login, "div", &["qw-modal_content"]);
    let anonymous = host.append_element(&body, "div", &["qw-modal"]);

    LandingPage {
        host,
        signup,
        signup_content,
        signup_close,
        login,
        anonymous,
        signup_trigger,
        login_trigger,
        dangling_trigger,
        burger,
        nav,
        nav_links,
        animated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_page_is_discoverable() {
        let page = landing_page();
        assert_eq!(page.host.element_by_id("signup"), Some(page.signup));
        assert_eq!(page.host.query_all(".qw-modal").len(), 3);
        assert_eq!(page.host.query_all("[data-qw-modal]").len(), 3);
        assert_eq!(page.host.query_all_in(&page.nav, ".qw-nav_link"), page.nav_links);
        assert!(page.host.query(".qw-overlay").is_none());
    }
}
