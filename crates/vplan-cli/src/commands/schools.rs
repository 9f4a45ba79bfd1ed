use vplan_core::SchoolDirectory;

pub fn run(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let matches = SchoolDirectory::shared().search(query);
    if matches.is_empty() {
        println!("No schools matched.");
    } else {
        for line in matches {
            println!("{line}");
        }
    }
    Ok(())
}
