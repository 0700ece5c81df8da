make_str_enum! {
    Tag {
        A = "a",
        Button = "button",
        Div = "div",
        Form = "form",
        H1 = "h1",
        H2 = "h2",
        Input = "input",
        Label = "label",
        Li = "li",
        Main = "main",
        Nav = "nav",
        P = "p",
        Section = "section",
        Span = "span",
        Ul = "ul",
    }
}
