use crate::updater::BackendData;
use ingress_backend_resolver_core::{ClusterCache, User, UserlistRef, UserlistStore};

const SECRET_KEY: &str = "auth";
const DEFAULT_REALM: &str = "localhost";

/// A credential line that could not be read.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum UserError {
    #[error("missing password of user '{user}' line {line}")]
    MissingPassword { user: String, line: usize },

    #[error("missing username line {line}")]
    MissingUsername { line: usize },
}

/// Configures HTTP basic authentication from the credentials stored in a secret.
///
/// Userlists are named after the secret, so backends referencing the same secret share a single
/// userlist and the secret is only parsed the first time it is referenced.
pub(crate) fn build(
    d: &mut BackendData<'_>,
    cache: &dyn ClusterCache,
    userlists: &mut dyn UserlistStore,
) {
    let ann = d.directives;
    let src = d.log.source();
    match ann.auth_type.as_str() {
        "basic" => {}
        "" => return,
        auth_type => {
            d.log.error(format_args!(
                "unsupported authentication type on {src}: {auth_type}"
            ));
            return;
        }
    }
    if ann.auth_secret.is_empty() {
        d.log.error(format_args!(
            "missing secret name on basic authentication on {src}"
        ));
        return;
    }

    let secret = full_qualified_name(&src.namespace, &ann.auth_secret);
    let list_name = secret.replacen('/', "_", 1);

    let name = match userlists.find_userlist(&list_name) {
        Some(userlist) => userlist.name.clone(),
        None => {
            let content = match cache.secret_content(&secret, SECRET_KEY) {
                Ok(content) => content,
                Err(error) => {
                    d.log.error(format_args!(
                        "error reading basic authentication on {src}: {error}"
                    ));
                    return;
                }
            };
            let (users, errors) = parse_users(&String::from_utf8_lossy(&content));
            for error in errors {
                d.log.warn(format_args!(
                    "ignoring malformed usr/passwd on secret '{secret}', declared on {src}: {error}"
                ));
            }
            let empty = users.is_empty();
            let userlist = userlists.add_userlist(list_name, users);
            if empty {
                d.log.warn(format_args!(
                    "userlist on {src} for basic authentication is empty"
                ));
            }
            userlist.name.clone()
        }
    };

    let realm = if ann.auth_realm.contains('"') {
        d.log
            .warn(format_args!("ignoring auth-realm with quotes on {src}"));
        DEFAULT_REALM
    } else if ann.auth_realm.is_empty() {
        DEFAULT_REALM
    } else {
        ann.auth_realm.as_str()
    };

    d.backend.userlist = Some(UserlistRef {
        name,
        realm: realm.to_string(),
    });
}

/// Qualifies a secret reference with the route's namespace, unless it names a namespace already.
fn full_qualified_name(namespace: &str, name: &str) -> String {
    if name.contains('/') {
        name.to_string()
    } else {
        format!("{namespace}/{name}")
    }
}

/// Reads newline-delimited credentials.
///
/// `user:hash` declares an encrypted password and `user::passwd` a clear text one. Malformed
/// lines are skipped and reported with their 1-based line number.
pub(crate) fn parse_users(content: &str) -> (Vec<User>, Vec<UserError>) {
    content.split('\n').enumerate().fold(
        (vec![], vec![]),
        |(mut users, mut errors), (i, line)| {
            match parse_user(line, i + 1) {
                Ok(Some(user)) => users.push(user),
                Ok(None) => {}
                Err(error) => errors.push(error),
            }
            (users, errors)
        },
    )
}

fn parse_user(line: &str, lineno: usize) -> Result<Option<User>, UserError> {
    if line.is_empty() {
        return Ok(None);
    }
    let Some((name, passwd)) = line.split_once(':') else {
        return Err(UserError::MissingPassword {
            user: line.to_string(),
            line: lineno,
        });
    };
    if name.is_empty() {
        return Err(UserError::MissingUsername { line: lineno });
    }
    if passwd.is_empty() || passwd == ":" {
        return Err(UserError::MissingPassword {
            user: name.to_string(),
            line: lineno,
        });
    }

    let user = match passwd.strip_prefix(':') {
        Some(clear) => User {
            name: name.to_string(),
            passwd: clear.to_string(),
            encrypted: false,
        },
        None => User {
            name: name.to_string(),
            passwd: passwd.to_string(),
            encrypted: true,
        },
    };
    Ok(Some(user))
}
