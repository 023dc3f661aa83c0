use anyhow::Result;

use portal_access::{PagePermission, PortalConfig, Role, group_pages_by_category};

pub fn run(
    config: &PortalConfig,
    role: &str,
    permissions: &[String],
    grouped: bool,
    json: bool,
) -> Result<()> {
    let policy = crate::load_policy(config)?;
    let role = Role::from_claim(Some(role));
    let pages = policy.accessible_pages(role, permissions);

    if json {
        let out = if grouped {
            serde_json::to_string_pretty(&group_pages_by_category(pages))?
        } else {
            serde_json::to_string_pretty(&pages)?
        };
        println!("{out}");
        return Ok(());
    }

    if pages.is_empty() {
        println!("No accessible pages for {role}.");
        return Ok(());
    }

    if grouped {
        for (category, pages) in group_pages_by_category(pages) {
            println!("[{category}]");
            print_pages(&pages);
        }
    } else {
        print_pages(&pages);
    }
    Ok(())
}

fn print_pages(pages: &[&PagePermission]) {
    for p in pages {
        println!("  {:<32} {}", p.path, p.label);
    }
}
