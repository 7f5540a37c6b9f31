// Web-Modul für die HTTP Control Surface

// HTML-Datei zur Compile-Zeit einbinden
// Die Datei wird direkt ins Binary eingebettet
pub const INDEX_HTML: &str = include_str!("index.html");
