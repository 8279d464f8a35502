use std::io::Write;
use std::panic;

use color_eyre::eyre::Result;

pub fn install_hooks() -> Result<()> {
    let hook_builder = color_eyre::config::HookBuilder::default().display_env_section(false);
    let (panic_hook, eyre_hook) = hook_builder.into_hooks();
    eyre_hook.install()?;

    panic::set_hook(Box::new(move |panic_info| {
        let _ = writeln!(std::io::stderr(), "{}", panic_hook.panic_report(panic_info));
    }));

    Ok(())
}
