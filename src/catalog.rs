use wheel_core::Project;

/// The portfolio shown on the wheel, one entry per slot.
pub fn projects() -> Vec<Project> {
    [
        ("/images/projects/harbour-lights.jpg", "/projects/harbour-lights", "Harbour Lights"),
        ("/images/projects/salt-flats.jpg", "/projects/salt-flats", "Salt Flats"),
        ("/images/projects/night-market.jpg", "/projects/night-market", "Night Market"),
        ("/images/projects/glasshouse.jpg", "/projects/glasshouse", "Glasshouse"),
        ("/images/projects/north-ridge.jpg", "/projects/north-ridge", "North Ridge"),
        ("/images/projects/paper-cranes.jpg", "/projects/paper-cranes", "Paper Cranes"),
        ("/images/projects/tidewater.jpg", "/projects/tidewater", "Tidewater"),
        ("/images/projects/last-light.jpg", "/projects/last-light", "Last Light"),
    ]
    .into_iter()
    .map(|(image, path, title)| Project::new(image, path, title))
    .collect()
}
