use checkreg::error::Result;
use checkreg::settings::{load_settings, save_settings, settings_file_exists, settings_path};

pub fn run(
    organization: Option<String>,
    category: Option<String>,
    preview_limit: Option<usize>,
    output_name: Option<String>,
) -> Result<()> {
    let mut settings = load_settings();
    let any_flag = organization.is_some()
        || category.is_some()
        || preview_limit.is_some()
        || output_name.is_some();

    if let Some(name) = organization {
        settings.organization_name = name.trim().to_string();
    } else if !any_flag && !settings_file_exists() {
        // First run: prompt for the organization name
        println!("Organization name [{}]: ", settings.organization_name);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.organization_name = chosen.to_string();
        }
    }
    if let Some(label) = category {
        settings.category_label = label.trim().to_string();
    }
    if let Some(limit) = preview_limit {
        settings.warning_preview_limit = limit;
    }
    if let Some(name) = output_name {
        settings.output_name = name.trim().to_string();
    }

    save_settings(&settings)?;
    println!("Saved settings to {}", settings_path().display());
    Ok(())
}
