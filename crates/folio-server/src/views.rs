//! HTML pages.
//!
//! Every string that comes from a document or a visitor is escaped before
//! it reaches the markup.

use std::fmt::Write as _;

use folio_cms::{Page, View};
use folio_types::DocumentName;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode a document name for use as one path segment.
fn segment(name: &DocumentName) -> String {
    let mut out = String::with_capacity(name.as_str().len());
    for b in name.as_str().bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

/// Render a page inside the common layout.
pub fn render_page(page: &Page) -> String {
    let title = match &page.view {
        View::Index { .. } => "Documents".to_string(),
        View::Edit { name, .. } => format!("Edit {}", escape(name.as_str())),
        View::NewDocument => "New Document".to_string(),
        View::Login { .. } => "Sign In".to_string(),
        View::Signup { .. } => "Sign Up".to_string(),
    };
    let body = match &page.view {
        View::Index { documents } => index(documents, page.user.as_deref()),
        View::Edit { name, content } => edit(name, content),
        View::NewDocument => new_document(),
        View::Login { username } => credentials_form("/users/login", "Sign In", username),
        View::Signup { username } => credentials_form("/users/sign_up", "Sign Up", username),
    };
    layout(&title, page, &body)
}

fn layout(title: &str, page: &Page, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!doctype html>\n<html lang='en'>\n<head>\n<meta charset='utf-8'>\n\
         <title>Folio - {title}</title>\n</head>\n<body>\n"
    );

    if let Some(error) = &page.flash.error {
        let _ = writeln!(html, "<div class='flash error'><p>{}</p></div>", escape(error));
    }
    if let Some(success) = &page.flash.success {
        let _ = writeln!(html, "<div class='flash success'><p>{}</p></div>", escape(success));
    }

    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

fn index(documents: &[DocumentName], user: Option<&str>) -> String {
    let mut html = String::from("<ul>\n");
    for name in documents {
        let href = segment(name);
        let shown = escape(name.as_str());
        let _ = writeln!(
            html,
            "<li><a href='/{href}'>{shown}</a> \
             <a href='/{href}/edit'>edit</a> \
             <form class='inline' method='post' action='/{href}/copy'>\
             <button type='submit'>copy</button></form> \
             <form class='inline' method='post' action='/{href}/destroy'>\
             <button type='submit'>delete</button></form></li>"
        );
    }
    html.push_str("</ul>\n<p><a href='/new'>New Document</a></p>\n");

    if let Some(user) = user {
        let _ = writeln!(
            html,
            "<form method='post' action='/users/logout'>\
             <p class='user-status'>Signed in as {}. <button type='submit'>Sign Out</button></p></form>",
            escape(user)
        );
    } else {
        html.push_str(
            "<p class='user-status'><a href='/users/login'>Sign In</a> \
             <a href='/users/sign_up'>Sign Up</a></p>\n",
        );
    }
    html
}

fn edit(name: &DocumentName, content: &str) -> String {
    let shown = escape(name.as_str());
    format!(
        "<form method='post' action='/{}/save'>\n\
         <label for='content'>Edit content of {shown}:</label>\n\
         <textarea id='content' name='content' rows='20' cols='80'>{}</textarea>\n\
         <button type='submit'>Save Changes</button>\n</form>\n",
        segment(name),
        escape(content),
    )
}

fn new_document() -> String {
    "<form method='post' action='/new'>\n\
     <label for='document_name'>Add a new document:</label>\n\
     <input id='document_name' name='document_name' type='text'>\n\
     <button type='submit'>Create</button>\n</form>\n"
        .to_string()
}

fn credentials_form(action: &str, label: &str, username: &str) -> String {
    format!(
        "<form method='post' action='{action}'>\n\
         <label for='username'>Username</label>\n\
         <input id='username' name='username' type='text' value='{}'>\n\
         <label for='password'>Password</label>\n\
         <input id='password' name='password' type='password'>\n\
         <button type='submit'>{label}</button>\n</form>\n",
        escape(username),
    )
}
