//! One-shot reveal animations driven by an intersection observer.

use std::rc::Rc;

use qwantum_dom::{Host, IntersectionEntry, Observer, ObserverOptions};
use tracing::{debug, warn};

use crate::controller::Qwantum;

/// Observer shared by every tagged element, plus the elements it watches.
pub(crate) struct RevealWatcher<H: Host> {
    observer: H::Observer,
    watched: Vec<H::Node>,
}

impl<H: Host> Qwantum<H> {
    /// Observe every element tagged for the reveal animation that is neither
    /// visible nor already watched. Returns how many were newly observed.
    /// Watched elements that have left the document are dropped first.
    ///
    /// Hosts without intersection support reveal the elements immediately.
    pub fn watch_reveals(&self) -> usize {
        self.prune_detached_reveals();
        let host = self.host();
        let classes = &self.config().classes;
        let candidates: Vec<H::Node> = {
            let state = self.inner.state.borrow();
            host.query_all(&Self::class_selector(&classes.animate))
                .into_iter()
                .filter(|node| !host.has_class(node, &classes.visible))
                .filter(|node| {
                    state
                        .reveal
                        .as_ref()
                        .is_none_or(|watcher| !watcher.watched.contains(node))
                })
                .collect()
        };
        if candidates.is_empty() {
            return 0;
        }

        let needs_observer = self.inner.state.borrow().reveal.is_none();
        if needs_observer {
            let Some(observer) = self.create_reveal_observer() else {
                warn!("intersection observer unavailable; revealing immediately");
                for node in &candidates {
                    host.add_class(node, &classes.visible);
                }
                return 0;
            };
            self.inner.state.borrow_mut().reveal = Some(RevealWatcher {
                observer,
                watched: Vec::new(),
            });
        }

        let mut state = self.inner.state.borrow_mut();
        let Some(watcher) = state.reveal.as_mut() else {
            return 0;
        };
        for node in &candidates {
            watcher.observer.observe(node);
        }
        watcher.watched.extend(candidates.iter().cloned());
        debug!(count = candidates.len(), "reveal targets observed");
        candidates.len()
    }

    fn prune_detached_reveals(&self) {
        let host = self.host();
        let mut state = self.inner.state.borrow_mut();
        let Some(RevealWatcher { observer, watched }) = state.reveal.as_mut() else {
            return;
        };
        let before = watched.len();
        watched.retain(|node| {
            let attached = host.is_attached(node);
            if !attached {
                observer.unobserve(node);
            }
            attached
        });
        if watched.len() < before {
            debug!(dropped = before - watched.len(), "detached reveal targets dropped");
        }
    }

    fn create_reveal_observer(&self) -> Option<H::Observer> {
        let options = ObserverOptions {
            threshold: self.config().reveal.threshold,
            root_margin: self.config().reveal.root_margin.clone(),
        };
        let weak = self.downgrade();
        self.host().observe_intersections(
            &options,
            Rc::new(move |entries: &[IntersectionEntry<H::Node>]| {
                if let Some(controller) = Self::upgrade(&weak) {
                    controller.reveal(entries);
                }
            }),
        )
    }

    fn reveal(&self, entries: &[IntersectionEntry<H::Node>]) {
        let visible = &self.config().classes.visible;
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            if !self.host().has_class(&entry.target, visible) {
                self.host().add_class(&entry.target, visible);
            }
            let mut state = self.inner.state.borrow_mut();
            if let Some(watcher) = state.reveal.as_mut() {
                watcher.observer.unobserve(&entry.target);
                watcher.watched.retain(|node| node != &entry.target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwantum_dom::MemoryHost;

    #[test]
    fn observer_uses_configured_options() {
        let host = MemoryHost::new();
        let _ = host.append_element(&host.body(), "section", &["qw-animate-fade-up"]);
        let _qw = Qwantum::with_defaults(host.clone());
        assert_eq!(
            host.observer_options(),
            vec![ObserverOptions {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px".into(),
            }]
        );
    }

    #[test]
    fn no_observer_without_tagged_elements() {
        let host = MemoryHost::new();
        let qw = Qwantum::with_defaults(host.clone());
        assert!(host.observer_options().is_empty());
        assert_eq!(qw.watch_reveals(), 0);
    }

    #[test]
    fn watch_reveals_picks_up_new_elements_only() {
        let host = MemoryHost::new();
        let first = host.append_element(&host.body(), "section", &["qw-animate-fade-up"]);
        let qw = Qwantum::with_defaults(host.clone());
        assert_eq!(qw.watch_reveals(), 0);

        let second = host.append_element(&host.body(), "section", &["qw-animate-fade-up"]);
        let shown = host.append_element(
            &host.body(),
            "section",
            &["qw-animate-fade-up", "qw-visible"],
        );
        assert_eq!(qw.watch_reveals(), 1);
        assert!(host.is_observed(&first));
        assert!(host.is_observed(&second));
        assert!(!host.is_observed(&shown));
        assert_eq!(host.observer_options().len(), 1);
    }

    #[test]
    fn detached_targets_stop_being_observed() {
        let host = MemoryHost::new();
        let kept = host.append_element(&host.body(), "section", &["qw-animate-fade-up"]);
        let removed = host.append_element(&host.body(), "section", &["qw-animate-fade-up"]);
        let qw = Qwantum::with_defaults(host.clone());
        host.remove(&removed);

        assert_eq!(qw.watch_reveals(), 0);
        assert!(!host.is_observed(&removed));
        assert!(host.is_observed(&kept));
        let watched = qw
            .inner
            .state
            .borrow()
            .reveal
            .as_ref()
            .map(|watcher| watcher.watched.clone());
        assert_eq!(watched, Some(vec![kept]));
    }

    #[test]
    fn partial_visibility_below_threshold_is_ignored() {
        let host = MemoryHost::new();
        let node = host.append_element(&host.body(), "section", &["qw-animate-fade-up"]);
        let _qw = Qwantum::with_defaults(host.clone());
        host.intersect(&node, 0.05);
        assert!(!host.has_class(&node, "qw-visible"));
        host.intersect(&node, 0.5);
        assert!(host.has_class(&node, "qw-visible"));
        assert!(!host.is_observed(&node));
    }
}
