entity! {
    /// A geofence anchor. `lat`/`long` are decimal strings, `distance` is the
    /// allowed radius in metres and `secret` is the shared code a dashboard
    /// client must present to log in against this point.
    Location => "location" {
        lat: String,
        long: String,
        distance: i64,
        secret: String,
    }
}
