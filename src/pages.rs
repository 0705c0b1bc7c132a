//! HTML pages: the post list and the add/edit forms.

use std::fmt::Write;

use crate::post::Post;

/// The front page: every post, newest last, with edit and delete controls.
pub fn index(posts: &[Post]) -> String {
    let mut body = String::from("<h1>Blog</h1>\n<p><a href=\"/add\">Add a post</a></p>\n");

    if posts.is_empty() {
        body.push_str("<p>No posts yet.</p>\n");
    }

    for post in posts {
        let _ = write!(
            body,
            "<article>\n\
             <h2>{title}</h2>\n\
             <p class=\"author\">by {author}</p>\n\
             <p>{content}</p>\n\
             <a href=\"/update/{id}\">Edit</a>\n\
             <form method=\"post\" action=\"/delete/{id}\">\
             <button type=\"submit\">Delete</button></form>\n\
             </article>\n",
            id = post.id,
            title = escape(&post.title),
            author = escape(&post.author),
            content = escape(&post.content),
        );
    }

    layout("Blog", &body)
}

/// The empty creation form.
pub fn add_form() -> String {
    let body = format!(
        "<h1>Add a post</h1>\n{}",
        post_form("/add", "", "", "", "Add post")
    );
    layout("Add a post", &body)
}

/// The edit form, pre-filled with the post's current text.
pub fn update_form(post: &Post) -> String {
    let action = format!("/update/{}", post.id);
    let body = format!(
        "<h1>Edit post</h1>\n{}",
        post_form(&action, &post.author, &post.title, &post.content, "Save")
    );
    layout("Edit post", &body)
}

fn post_form(action: &str, author: &str, title: &str, content: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Author <input name=\"author\" value=\"{author}\" required></label>\n\
         <label>Title <input name=\"title\" value=\"{title}\" required></label>\n\
         <label>Content <textarea name=\"content\" required>{content}</textarea></label>\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>\n",
        author = escape(author),
        title = escape(title),
        content = escape(content),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Escapes text for element content and double- or single-quoted attributes.
pub fn escape(text: &str) -> String {
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
