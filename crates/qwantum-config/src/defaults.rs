//! Default class names, timings and thresholds.
//!
//! # Design
//! - Centralise the markup contract so page authors and the controller agree.
//! - Keep timing defaults explicit; they pair with the stylesheet's transitions.

/// Marker class on dialog roots.
pub const MODAL_CLASS: &str = "qw-modal";
/// Close control inside a dialog.
pub const MODAL_CLOSE_CLASS: &str = "qw-modal_close";
/// State class for visible dialogs and menu parts.
pub const ACTIVE_CLASS: &str = "qw-active";
/// Attribute naming the dialog an element opens.
pub const MODAL_TRIGGER_ATTRIBUTE: &str = "data-qw-modal";
/// Burger trigger.
pub const BURGER_CLASS: &str = "qw-burger";
/// Mobile navigation panel.
pub const NAV_MOBILE_CLASS: &str = "qw-nav-mobile";
/// Backdrop behind the mobile panel.
pub const OVERLAY_CLASS: &str = "qw-overlay";
/// Links inside the mobile panel.
pub const NAV_LINK_CLASS: &str = "qw-nav_link";
/// Elements that fade in when scrolled into view.
pub const ANIMATE_CLASS: &str = "qw-animate-fade-up";
/// Marker added once an element has been revealed.
pub const VISIBLE_CLASS: &str = "qw-visible";
/// Notification stack container.
pub const NOTIFICATIONS_CLASS: &str = "qw-notifications";
/// Notification card.
pub const NOTIFICATION_CLASS: &str = "qw-notification";

/// Viewport width above which the mobile menu closes itself.
pub const MENU_COLLAPSE_ABOVE_PX: u32 = 768;
/// Visible fraction that reveals an element.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Root margin for the reveal observer; pulls the bottom edge up.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Delay before `fade_in` adds the visible marker.
pub const FADE_IN_DELAY_MS: u32 = 100;
/// Delay before a new notification slides in.
pub const NOTIFICATION_ENTER_DELAY_MS: u32 = 100;
/// Exit animation length before a notification is removed.
pub const NOTIFICATION_EXIT_MS: u32 = 300;
/// Lifetime of a notification when the caller does not set one.
pub const NOTIFICATION_DURATION_MS: u32 = 3_000;

/// Prefix for emitted DOM event names.
pub const EVENT_PREFIX: &str = "qw";
