//! Notification feed for the `user` role.
//!
//! The list is fetched once, refreshed every [`NOTIFICATION_POLL`], and fed
//! by a realtime socket whose JSON frames are notifications (one object or an
//! array). Frames are merged newest first; an id already in the list is
//! ignored.

use crate::api::Api;
use crate::config::{AppConfig, NOTIFICATION_POLL};
use crate::web::timer::{Subscription, poll};
use futures::StreamExt;
use futures::future::abortable;
use gloo_net::websocket::Message;
use gloo_net::websocket::futures::WebSocket;
use kejaksaan_shared::{Id, Notification};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Deserialize;

/// Puts `incoming` at the front unless its id is already present.
pub fn merge(list: &mut Vec<Notification>, incoming: Notification) -> bool {
    if list.iter().any(|n| n.id == incoming.id) {
        return false;
    }
    list.insert(0, incoming);
    true
}

pub fn mark_read(list: &mut [Notification], id: &Id) {
    for n in list.iter_mut().filter(|n| &n.id == id) {
        n.is_read = true;
    }
}

pub fn unread_count(list: &[Notification]) -> usize {
    list.iter().filter(|n| !n.is_read).count()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Frame {
    Many(Vec<Notification>),
    One(Notification),
}

/// Notifications carried by one socket frame, oldest first.
pub fn parse_frame(text: &str) -> Vec<Notification> {
    match serde_json::from_str::<Frame>(text) {
        Ok(Frame::One(n)) => vec![n],
        Ok(Frame::Many(mut list)) => {
            // Arrays arrive newest first, like the list endpoint.
            list.reverse();
            list
        }
        Err(e) => {
            log::debug!("[Notifications] ignoring frame: {e}");
            Vec::new()
        }
    }
}

#[derive(Clone, Copy)]
pub struct NotificationFeed {
    items: RwSignal<Vec<Notification>>,
    api: StoredValue<Api>,
}

impl NotificationFeed {
    pub fn new(api: Api) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            api: StoredValue::new(api),
        }
    }

    pub fn items(&self) -> Vec<Notification> {
        self.items.get()
    }

    pub fn unread(&self) -> usize {
        self.items.with(|list| unread_count(list))
    }

    pub fn refresh(&self) {
        let feed = *self;
        let api = self.api.get_value();
        spawn_local(async move {
            match api.list_notifications().await {
                Ok(list) => feed.items.set(list),
                Err(e) => log::warn!("[Notifications] fetch failed: {e}"),
            }
        });
    }

    pub fn mark_read(&self, id: Id) {
        let feed = *self;
        let api = self.api.get_value();
        spawn_local(async move {
            match api.mark_notification_read(&id).await {
                Ok(()) => feed.items.update(|list| mark_read(list, &id)),
                Err(e) => log::warn!("[Notifications] mark read failed: {e}"),
            }
        });
    }

    /// Fetches now, then keeps the list current until the returned
    /// subscription is dropped.
    pub fn start(&self, config: &AppConfig) -> Subscription {
        self.refresh();

        let feed = *self;
        let poller = poll(NOTIFICATION_POLL, move || feed.refresh());

        let socket = match self.api.with_value(|api| api.session().token()) {
            Some(token) => self.listen(config.notification_socket_url(&token)),
            None => Subscription::noop(),
        };

        Subscription::new(move || drop((poller, socket)))
    }

    fn listen(&self, url: String) -> Subscription {
        let ws = match WebSocket::open(&url) {
            Ok(ws) => ws,
            Err(e) => {
                log::warn!("[Notifications] socket unavailable: {e}");
                return Subscription::noop();
            }
        };

        let feed = *self;
        let (reader, handle) = abortable(async move {
            let (_write, mut read) = ws.split();
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        for n in parse_frame(&text) {
                            feed.items.update(|list| {
                                merge(list, n);
                            });
                        }
                    }
                    Ok(Message::Bytes(_)) => {}
                    Err(e) => {
                        log::warn!("[Notifications] socket closed: {e}");
                        break;
                    }
                }
            }
        });
        spawn_local(async move {
            let _ = reader.await;
        });

        Subscription::new(move || handle.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, read: bool) -> Notification {
        Notification {
            id: Id::from(id),
            title: None,
            message: format!("pesan {id}"),
            is_read: read,
            created_at: None,
        }
    }

    #[test]
    fn merge_skips_known_ids_and_prepends_new_ones() {
        let mut list = vec![note(1, false)];
        assert!(merge(&mut list, note(2, false)));
        assert!(!merge(&mut list, note(1, true)));
        let ids: Vec<_> = list.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec![Id::from(2), Id::from(1)]);
        assert!(!list[1].is_read);
    }

    #[test]
    fn mark_read_updates_unread_count() {
        let mut list = vec![note(1, false), note(2, false), note(3, true)];
        assert_eq!(unread_count(&list), 2);
        mark_read(&mut list, &Id::from(2));
        assert_eq!(unread_count(&list), 1);
        mark_read(&mut list, &Id::from(99));
        assert_eq!(unread_count(&list), 1);
    }

    #[test]
    fn frames_accept_objects_and_arrays() {
        let one = parse_frame(r#"{"id":5,"message":"Sidang besok"}"#);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].message, "Sidang besok");

        let many = parse_frame(r#"[{"id":7,"message":"b"},{"id":6,"message":"a"}]"#);
        let mut list = Vec::new();
        for n in many {
            merge(&mut list, n);
        }
        assert_eq!(list[0].id, Id::from(7));

        assert!(parse_frame("ping").is_empty());
    }
}
