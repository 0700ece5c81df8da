make_str_enum! {
    Attr {
        Class = "class",
        Disabled = "disabled",
        Href = "href",
        Id = "id",
        Name = "name",
        Placeholder = "placeholder",
        Role = "role",
        Style = "style",
        TabIndex = "tabindex",
        Title = "title",
        Type = "type",
        Value = "value",
    }
}
