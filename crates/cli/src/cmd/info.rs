use extbuild_lib::cmake::{self, CmakeError};
use extbuild_lib::platform::{CompilerKind, Os, Platform, find_interpreter};

use crate::output::{Status, detail, status};

pub fn cmd_info(program: &str) {
  println!("System:");
  match Platform::current() {
    Some(platform) => {
      detail("Platform", platform.triple());
      detail("Plat name", platform.plat_name());
    }
    None => println!("Could not detect platform."),
  }
  detail("Compiler", CompilerKind::default_for(Os::current()));

  if let Some(python) = find_interpreter() {
    detail("Python", python.display());
  }

  println!();
  println!("CMake:");
  if let Some(path) = cmake::locate(program) {
    detail("Path", path.display());
  }
  match cmake::probe(program, "") {
    Ok(found) => detail("Version", found.version),
    Err(CmakeError::NotInstalled { .. }) => status(Status::Warning, &format!("{} not found", program)),
    Err(e) => status(Status::Warning, &e.to_string()),
  }
}
