//! Generation of the descriptive project information document.
//!
//! The document is a fixed Markdown template; only the project identity and
//! the generation time vary between runs.

use crate::error::{PackagingError, Result};
use crate::stamp::RunStamp;
use camino::{Utf8Path, Utf8PathBuf};
use packwright_common::ProjectConfig;
use std::fs;

const STRUCTURE_OUTLINE: &str = r"## Project structure
```
BatteryMonitorApp/
├── app/                          # Application module
│   ├── build.gradle              # Module build configuration
│   ├── proguard-rules.pro        # ProGuard rules
│   └── src/main/
│       ├── AndroidManifest.xml   # Application manifest
│       ├── java/                 # Java sources
│       │   └── com/batterymonitor/app/
│       │       ├── MainActivity.java
│       │       ├── SettingsActivity.java
│       │       ├── HistoryActivity.java
│       │       ├── service/      # Services
│       │       ├── manager/      # Managers
│       │       ├── receiver/     # Broadcast receivers
│       │       ├── model/        # Data models
│       │       ├── utils/        # Utilities
│       │       └── adapter/      # List adapters
│       └── res/                  # Resources
│           ├── layout/           # Layouts
│           ├── values/           # Value resources
│           ├── drawable/         # Drawables
│           ├── mipmap-*/         # Launcher icons
│           └── xml/              # XML configuration
├── build.gradle                  # Root build configuration
├── settings.gradle               # Project settings
├── gradle.properties             # Gradle properties
├── README.md                     # Project overview
└── INSTALL.md                    # Installation guide
```
";

const FEATURES: &str = "## Main features
1. **Battery monitoring**: tracks battery level changes in real time
2. **Floating window**: shows monitoring status above other apps
3. **Result history**: stores test results and summary statistics
4. **Custom settings**: configurable test parameters and appearance

## Technology
- **Architecture**: MVVM with service-oriented background work
- **UI framework**: Material Design
- **Storage**: SharedPreferences
- **Permissions**: runtime permission requests
- **Power**: foreground service with battery optimisation handling
";

const BUILD_NOTES: &str = "## Building
1. Open the project in Android Studio
2. Make sure the SDK levels are compileSdk 34 and minSdk 23
3. Run `./gradlew assembleDebug`
4. The APK is written to `app/build/outputs/apk/debug/`

## Installation requirements
- Android 6.0+ (API 23+)
- About 5 MB of free storage
- Permission to draw over other apps
- Battery optimisation disabled for the app (recommended)

See INSTALL.md for detailed usage instructions.

## Developer information
- **IDE**: Android Studio
- **Language**: Java 8
- **Build tool**: Gradle 8.0.2
- **Target SDK**: Android 14 (API 34)

---
This project is open source and provided for learning and research.
";

/// Render the project information document.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use chrono::NaiveDate;
/// use packwright::metadata::render_project_info;
/// use packwright::stamp::RunStamp;
/// use packwright_common::ProjectConfig;
///
/// let project = ProjectConfig {
///     name: "Demo".to_owned(),
///     title: "Demo App".to_owned(),
///     version: "2.1".to_owned(),
///     platform: None,
///     root: Utf8PathBuf::from("."),
/// };
/// let at = NaiveDate::from_ymd_opt(2026, 1, 2)
///     .and_then(|d| d.and_hms_opt(3, 4, 5))
///     .expect("valid date");
/// let doc = render_project_info(&project, &RunStamp::from_datetime(at));
/// assert!(doc.contains("**Packaged at**: 2026-01-02 03:04:05"));
/// ```
#[must_use]
pub fn render_project_info(project: &ProjectConfig, generated_at: &RunStamp) -> String {
    let platform = project
        .platform
        .as_deref()
        .map(|platform| format!("- **Target platform**: {platform}\n"))
        .unwrap_or_default();

    format!(
        concat!(
            "# {title} project information\n\n",
            "## Overview\n",
            "- **Project name**: {title} ({name})\n",
            "- **Version**: {version}\n",
            "- **Packaged at**: {time}\n",
            "{platform}\n",
            "{outline}\n",
            "{features}\n",
            "{build}"
        ),
        title = project.title,
        name = project.name,
        version = project.version,
        time = generated_at.display_time(),
        platform = platform,
        outline = STRUCTURE_OUTLINE,
        features = FEATURES,
        build = BUILD_NOTES,
    )
}

/// Write the project information document into the staging directory.
///
/// Returns the path of the written document.
///
/// # Errors
///
/// Returns [`PackagingError::MetadataWrite`] if the file cannot be written.
pub fn write_project_info(
    staging_dir: &Utf8Path,
    file_name: &str,
    project: &ProjectConfig,
    generated_at: &RunStamp,
) -> Result<Utf8PathBuf> {
    let path = staging_dir.join(file_name);
    let document = render_project_info(project, generated_at);
    fs::write(&path, document).map_err(|source| PackagingError::MetadataWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
