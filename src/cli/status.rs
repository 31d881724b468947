use checkreg::error::Result;
use checkreg::settings::{load_settings, settings_file_exists, settings_path};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let path = settings_path();

    if settings_file_exists() {
        println!("Settings:      {}", path.display());
    } else {
        println!("Settings:      {} (not saved, using defaults)", path.display());
    }
    println!("Organization:  {}", settings.organization_name);
    println!("Bank code:     {}", settings.category_label);
    println!("Preview limit: {}", settings.warning_preview_limit);
    println!("Output name:   {}.xlsx", settings.output_name);

    if !settings_file_exists() {
        println!();
        println!("Run `checkreg init` to save your own defaults.");
    }
    Ok(())
}
