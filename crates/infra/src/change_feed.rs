//! Table-change notifications for live dashboards.
//!
//! Every repository publishes a [`TableChange`] after a successful mutation;
//! the API fans them out over SSE so dashboards can re-query. Lossy broadcast,
//! no backpressure on the write path.

use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableChange {
    pub tabla: &'static str,
    pub op: ChangeOp,
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<TableChange>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, tabla: &'static str, op: ChangeOp, id: impl ToString) {
        let change = TableChange {
            tabla,
            op,
            id: id.to_string(),
        };
        // No receivers is fine; dashboards may simply not be open.
        let _ = self.tx.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_changes() {
        let feed = ChangeFeed::default();
        let mut rx = feed.subscribe();

        feed.publish("productos", ChangeOp::Created, "abc");

        let change = rx.recv().await.unwrap();
        assert_eq!(change.tabla, "productos");
        assert_eq!(change.op, ChangeOp::Created);
        assert_eq!(change.id, "abc");
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let feed = ChangeFeed::default();
        feed.publish("cupones_descuento", ChangeOp::Deleted, "x");
    }
}
