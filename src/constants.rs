use const_format::formatcp;

pub(crate) mod localization {
    pub const CONVERTING_FILE_MSG: &str = "Converting file.";
    pub const CONVERTED_FILE_MSG: &str = "Converted file successfully.";
    pub const CONVERT_FAILED_MSG: &str = "Converting file failed";
    pub const CONVERT_BLANK_MSG: &str = "Converting result is blank.";

    pub const RESTORING_FILE_MSG: &str = "Restoring file.";
    pub const RESTORED_FILE_MSG: &str = "Restored file successfully.";
    pub const RESTORE_FAILED_MSG: &str = "Restoring file failed";
    pub const RESTORED_SPECIAL_MSG: &str =
        "Restored special files successfully.";
    pub const NO_SPECIAL_DIR_MSG: &str =
        "Special files directory doesn't exist. Skipping overlay.";

    pub const UNKNOWN_FILE_TYPE_MSG: &str = "Unknown file type.";
    pub const UNHANDLED_FILE_TYPE_MSG: &str =
        "File type is recognized, but isn't handled yet. Skipping it.";
    pub const SKIPPED_BY_FLAGS_MSG: &str =
        "File type is disabled by file flags. Skipping it.";
    pub const TRANSLATION_EXISTS_MSG: &str = "Translation exists.";
    pub const MISSING_DIR_MSG: &str = "Directory doesn't exist. Skipping it.";
    pub const CLEANED_DIR_MSG: &str = "Directory cleaned.";

    pub const BAD_KEY_MSG: &str =
        "Couldn't parse the key of a translation record. The record won't be applied.";
    pub const UNKNOWN_QUEST_MSG: &str =
        "Quest block doesn't exist in the original file. The record won't be applied.";

    pub const CONVERT_START_MSG: &str = "======= CONVERT START =======";
    pub const RESTORE_START_MSG: &str = "======= RESTORE START =======";
}

/// Separator between the fields of a composite translation unit key.
pub const KEY_SEPARATOR: &str = " | ";
/// Separator between the options of a choice command in the unit text.
pub const CHOICE_SEPARATOR: &str = "\n";
/// Separator between the options of a choice command in the context text.
pub const CHOICE_CONTEXT_SEPARATOR: &str = " | ";
/// Separator between restored quest blocks.
pub const QUEST_SEPARATOR: &str = "\n\n";

pub const DISPLAY_NAME_KEY: &str = "displayName";
pub const GAME_TITLE_KEY: &str = "gameTitle";
pub const LOCALE_KEY: &str = "locale";
pub const SKILL_TYPES_KEY: &str = "skillTypes";
pub const TERMS_KEY: &str = "terms";
pub const BASIC_KEY: &str = "basic";
pub const COMMANDS_KEY: &str = "commands";
pub const PARAMS_KEY: &str = "params";
pub const MESSAGES_KEY: &str = "messages";
pub const NAME_KEY: &str = "name";
pub const DESCRIPTION_KEY: &str = "description";

pub const TERMS_BASIC_PREFIX: &str =
    formatcp!("{TERMS_KEY}{KEY_SEPARATOR}{BASIC_KEY}");
pub const TERMS_COMMANDS_PREFIX: &str =
    formatcp!("{TERMS_KEY}{KEY_SEPARATOR}{COMMANDS_KEY}");
pub const TERMS_PARAMS_PREFIX: &str =
    formatcp!("{TERMS_KEY}{KEY_SEPARATOR}{PARAMS_KEY}");
pub const TERMS_MESSAGES_PREFIX: &str =
    formatcp!("{TERMS_KEY}{KEY_SEPARATOR}{MESSAGES_KEY}");

/// Matches a whole `<quest N: title|x|y> ... </quest>` block and captures `N`.
pub const QUEST_PATTERN: &str =
    r"(<quest (\d+?):[\s\S]+?\|\d+?\|\d+?>[\s\S]+?</quest>)";

/// Extension appended to a game-relative path to get its unit file path.
pub const UNIT_FILE_EXTENSION: &str = "json";

/// Directories under the game root that hold convertible files.
pub const SOURCE_DIRS: [&str; 2] = ["www/data", "www/quest"];
