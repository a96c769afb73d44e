use mongodb::Client;

/// Check MongoDB connectivity with a lightweight server round-trip.
///
/// Used by readiness probes; returns false on any driver error.
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}
