//! Alert headers read by the client to display notifications after
//! entity mutations and failures.

pub type Header = (String, String);

pub fn create_alert(application_name: &str, message: &str, param: &str) -> Vec<Header> {
    vec![
        (format!("X-{}-alert", application_name), message.to_string()),
        (format!("X-{}-params", application_name), encode_param(param)),
    ]
}

pub fn create_entity_creation_alert(
    application_name: &str,
    enable_translation: bool,
    entity_name: &str,
    param: &str,
) -> Vec<Header> {
    let message = if enable_translation {
        format!("{}.{}.created", application_name, entity_name)
    } else {
        format!("A new {} is created with identifier {}", entity_name, param)
    };
    create_alert(application_name, &message, param)
}

pub fn create_entity_update_alert(
    application_name: &str,
    enable_translation: bool,
    entity_name: &str,
    param: &str,
) -> Vec<Header> {
    let message = if enable_translation {
        format!("{}.{}.updated", application_name, entity_name)
    } else {
        format!("A {} is updated with identifier {}", entity_name, param)
    };
    create_alert(application_name, &message, param)
}

pub fn create_entity_deletion_alert(
    application_name: &str,
    enable_translation: bool,
    entity_name: &str,
    param: &str,
) -> Vec<Header> {
    let message = if enable_translation {
        format!("{}.{}.deleted", application_name, entity_name)
    } else {
        format!("A {} is deleted with identifier {}", entity_name, param)
    };
    create_alert(application_name, &message, param)
}

pub fn create_failure_alert(
    application_name: &str,
    enable_translation: bool,
    entity_name: &str,
    error_key: &str,
    default_message: &str,
) -> Vec<Header> {
    log::error!("Entity processing failed, {}", default_message);

    let message = if enable_translation {
        format!("error.{}", error_key)
    } else {
        default_message.to_string()
    };
    vec![
        (format!("X-{}-error", application_name), message),
        (format!("X-{}-params", application_name), encode_param(entity_name)),
    ]
}

// Header values must stay ASCII.
fn encode_param(param: &str) -> String {
    urlencoding::encode(param).into_owned()
}
