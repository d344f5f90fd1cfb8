use super::ast;
use super::lexer::Lexer;
use super::lexer::Token;
use crate::error::ParseError;

#[derive(Debug, Clone)]
pub struct DotParser {
    lexer: Lexer,
    tok: Token,
    /// Set while parsing the body of a 'digraph'.
    directed: bool,
}

impl DotParser {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        Self {
            lexer: Lexer::new(chars),
            tok: Token::Colon,
            directed: false,
        }
    }

    /// Creates an error at the location of the current token.
    fn error<T>(&self, msg: &str) -> Result<T, ParseError> {
        let at = self.lexer.tok_start;
        let (line, column) = self.lexer.location(at);
        Err(ParseError {
            line,
            column,
            message: msg.to_string(),
            excerpt: self.lexer.excerpt(at),
        })
    }

    fn unexpected<T>(&self, expected: &str) -> Result<T, ParseError> {
        self.error(&format!("Expected {}, found {}", expected, self.describe()))
    }

    fn describe(&self) -> String {
        match &self.tok {
            Token::EOF => "end of file".to_string(),
            Token::Identifier(s) | Token::Numeral(s) => format!("'{}'", s),
            Token::QuotedString(s) => format!("\"{}\"", s),
            Token::HtmlString(_) => "an HTML string".to_string(),
            Token::Error(msg) => msg.clone(),
            tok => format!("{:?}", tok),
        }
    }

    /// Lex the next token.
    pub fn lex(&mut self) -> Result<(), ParseError> {
        if let Token::EOF = self.tok {
            return self.error("Can't parse after the end of the file");
        }
        self.tok = self.lexer.next_token();
        if let Token::Error(msg) = self.tok.clone() {
            return self.error(&msg);
        }
        Ok(())
    }

    /// Returns the current token as an ID, if it is one.
    fn current_id(&self) -> Option<ast::DotId> {
        match &self.tok {
            Token::Identifier(s) => Some(ast::DotId::plain(s)),
            Token::Numeral(s) => Some(ast::DotId::new(s, ast::IdKind::Numeral)),
            Token::QuotedString(s) => Some(ast::DotId::quoted(s)),
            Token::HtmlString(s) => Some(ast::DotId::html(s)),
            _ => None,
        }
    }

    fn parse_id(&mut self, what: &str) -> Result<ast::DotId, ParseError> {
        if let Some(id) = self.current_id() {
            self.lex()?;
            return Ok(id);
        }
        self.unexpected(what)
    }

    fn expect(&mut self, tok: Token, what: &str) -> Result<(), ParseError> {
        if self.tok == tok {
            return self.lex();
        }
        self.unexpected(what)
    }

    // graph : [ strict ] (graph | digraph) [ ID ] '{' stmt_list '}'
    pub fn parse_graph(&mut self) -> Result<ast::Graph, ParseError> {
        let mut strict = false;
        // Consume the 'strict' keyword.
        if let Token::StrictKW = self.tok {
            strict = true;
            self.lex()?;
        }

        match self.tok {
            Token::GraphKW => self.directed = false,
            Token::DigraphKW => self.directed = true,
            _ => return self.unexpected("'graph' or 'digraph'"),
        }
        self.lex()?;

        // Consume the optional graph name.
        let mut name = None;
        if let Some(id) = self.current_id() {
            name = Some(id);
            self.lex()?;
        }

        let mut graph = ast::Graph::new(strict, self.directed, name);
        self.expect(Token::OpenBrace, "'{'")?;
        graph.list = self.parse_stmt_list()?;
        Ok(graph)
    }

    // subgraph : [ subgraph [ ID ] ] '{' stmt_list '}'
    pub fn parse_subgraph(&mut self) -> Result<ast::SubGraph, ParseError> {
        let mut sg = ast::SubGraph::new(None);
        if let Token::SubgraphKW = self.tok {
            self.lex()?;
            // Consume the optional graph name.
            if let Some(id) = self.current_id() {
                sg.name = Some(id);
                self.lex()?;
            }
        }
        self.expect(Token::OpenBrace, "'{'")?;
        sg.list = self.parse_stmt_list()?;
        Ok(sg)
    }

    // stmt_list : [ stmt [ ';' ] stmt_list ]
    pub fn parse_stmt_list(&mut self) -> Result<ast::StmtList, ParseError> {
        let mut lst = ast::StmtList::new();

        loop {
            match self.tok {
                Token::Semicolon => {
                    self.lex()?;
                }
                Token::CloseBrace => {
                    // Consume the '}' and exit.
                    self.lex()?;
                    return Ok(lst);
                }
                Token::EOF => {
                    return self.unexpected("'}'");
                }
                _ => {
                    let stmt = self.parse_stmt()?;
                    lst.list.push(stmt);
                }
            }
        }
    }

    // stmt : node_stmt | edge_stmt | attr_stmt | ID '=' ID | subgraph
    pub fn parse_stmt(&mut self) -> Result<ast::Stmt, ParseError> {
        match self.tok {
            Token::Identifier(_)
            | Token::Numeral(_)
            | Token::QuotedString(_)
            | Token::HtmlString(_) => {
                let name = self.parse_id("an identifier")?;
                if let Token::Equal = self.tok {
                    let st = self.parse_assignment(name)?;
                    return Ok(ast::Stmt::Attribute(st));
                }
                let id0 = self.parse_port(name)?;
                if self.is_edge_token() {
                    let es = self.parse_edge_stmt(ast::EdgeOperand::Node(id0))?;
                    return Ok(ast::Stmt::Edge(es));
                }
                let mut ns = ast::NodeStmt::new(id0);
                if let Token::OpenBracket = self.tok {
                    ns.list = self.parse_attr_list()?;
                }
                Ok(ast::Stmt::Node(ns))
            }
            Token::SubgraphKW | Token::OpenBrace => {
                let subgraph = self.parse_subgraph()?;
                if self.is_edge_token() {
                    let from = ast::EdgeOperand::SubGraph(subgraph);
                    let es = self.parse_edge_stmt(from)?;
                    return Ok(ast::Stmt::Edge(es));
                }
                Ok(ast::Stmt::SubGraph(subgraph))
            }
            //attr_stmt : (graph | node | edge) attr_list
            Token::GraphKW | Token::NodeKW | Token::EdgeKW => {
                let target = match self.tok {
                    Token::GraphKW => ast::AttrStmtTarget::Graph,
                    Token::NodeKW => ast::AttrStmtTarget::Node,
                    _ => ast::AttrStmtTarget::Edge,
                };
                self.lex()?;
                let list = self.parse_attr_list()?;
                Ok(ast::Stmt::Attribute(ast::AttrStmt::new(target, list)))
            }
            _ => self.unexpected("a statement"),
        }
    }

    //attr_list : '[' [ a_list ] ']' [ attr_list ]
    pub fn parse_attr_list(
        &mut self,
    ) -> Result<ast::AttributeList, ParseError> {
        let mut lst = ast::AttributeList::new();

        if self.tok != Token::OpenBracket {
            return self.unexpected("'['");
        }

        while let Token::OpenBracket = self.tok {
            self.lex()?;
            // a_list : ID '=' ID [ (';' | ',') ] [ a_list ]
            while self.tok != Token::CloseBracket {
                let prop = self.parse_id("a property name")?;
                self.expect(Token::Equal, "'='")?;
                let value = self.parse_id("a value after '='")?;
                lst.add(&prop.value, value);

                // Skip the separator.
                if let Token::Semicolon | Token::Comma = self.tok {
                    self.lex()?;
                }
            }
            // Consume the ']'.
            self.lex()?;
        }
        Ok(lst)
    }

    fn is_edge_token(&self) -> bool {
        matches!(self.tok, Token::ArrowLine | Token::ArrowRight)
    }

    // ID '=' ID
    pub fn parse_assignment(
        &mut self,
        name: ast::DotId,
    ) -> Result<ast::AttrStmt, ParseError> {
        self.expect(Token::Equal, "'='")?;
        let value = self.parse_id("a value after '='")?;
        let mut lst = ast::AttributeList::new();
        lst.add(&name.value, value);
        Ok(ast::AttrStmt::new(ast::AttrStmtTarget::Graph, lst))
    }

    //edge_stmt : (node_id | subgraph) edgeRHS [ attr_list ]
    pub fn parse_edge_stmt(
        &mut self,
        from: ast::EdgeOperand,
    ) -> Result<ast::EdgeStmt, ParseError> {
        let mut es = ast::EdgeStmt::new(from);

        while self.is_edge_token() {
            let ak = match self.tok {
                Token::ArrowRight if self.directed => ast::ArrowKind::Arrow,
                Token::ArrowLine if !self.directed => ast::ArrowKind::Line,
                Token::ArrowRight => {
                    return self.error("'->' is not allowed in an undirected graph");
                }
                _ => {
                    return self.error("'--' is not allowed in a directed graph");
                }
            };
            // Consume the arrow.
            self.lex()?;
            let operand = match self.tok {
                Token::SubgraphKW | Token::OpenBrace => {
                    ast::EdgeOperand::SubGraph(self.parse_subgraph()?)
                }
                _ => ast::EdgeOperand::Node(self.parse_node_id()?),
            };
            es.insert(operand, ak);
        }
        // Parse the optional attribute list.
        if let Token::OpenBracket = self.tok {
            es.list = self.parse_attr_list()?;
        }

        Ok(es)
    }

    //node_id : ID [ port ]
    pub fn parse_node_id(&mut self) -> Result<ast::NodeId, ParseError> {
        let name = self.parse_id("a node name")?;
        self.parse_port(name)
    }

    // port : ':' ID [ ':' compass_pt ] | ':' compass_pt
    fn parse_port(
        &mut self,
        name: ast::DotId,
    ) -> Result<ast::NodeId, ParseError> {
        if self.tok != Token::Colon {
            return Ok(ast::NodeId::new(name, None));
        }
        // Consume the colon.
        self.lex()?;
        let mut port = self.parse_id("a port name")?.value;
        if let Token::Colon = self.tok {
            self.lex()?;
            let compass = self.parse_id("a compass point")?;
            port.push(':');
            port.push_str(&compass.value);
        }
        Ok(ast::NodeId::new(name, Some(port)))
    }

    /// Parses dot files, as specified here:
    /// <https://graphviz.org/doc/info/lang.html>
    /// A file may contain several graphs, which are returned in source order.
    pub fn process(&mut self) -> Result<Vec<ast::Graph>, ParseError> {
        self.lex()?;
        let mut graphs = vec![self.parse_graph()?];
        while self.tok != Token::EOF {
            graphs.push(self.parse_graph()?);
        }
        Ok(graphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{EdgeOperand, Stmt};

    fn parse(input: &str) -> Vec<ast::Graph> {
        let mut parser = DotParser::new(input);
        match parser.process() {
            Ok(g) => g,
            Err(err) => panic!("{}\n{}", err, err.excerpt),
        }
    }

    fn parse_err(input: &str) -> ParseError {
        let mut parser = DotParser::new(input);
        parser.process().expect_err("expected a syntax error")
    }

    #[test]
    fn parse_program0() {
        let g = parse("graph { a -- b; b -- c;}");
        assert_eq!(g.len(), 1);
        assert!(!g[0].directed);
        assert_eq!(g[0].list.list.len(), 2);
    }

    #[test]
    fn parse_chain() {
        let g = parse("digraph G { a -> b -> c [color=red] }");
        assert_eq!(g[0].name, Some(ast::DotId::plain("G")));
        if let Stmt::Edge(es) = &g[0].list.list[0] {
            assert_eq!(es.to.len(), 2);
            assert_eq!(es.list.list.len(), 1);
        } else {
            panic!("expected an edge statement");
        }
    }

    #[test]
    fn parse_ports() {
        let g = parse("digraph { a:p1:ne -> b:s; n; }");
        if let Stmt::Edge(es) = &g[0].list.list[0] {
            if let EdgeOperand::Node(from) = &es.from {
                assert_eq!(from.port.as_deref(), Some("p1:ne"));
            } else {
                panic!("expected a node operand");
            }
            if let EdgeOperand::Node(to) = &es.to[0].0 {
                assert_eq!(to.name.value, "b");
                assert_eq!(to.port.as_deref(), Some("s"));
            } else {
                panic!("expected a node operand");
            }
        } else {
            panic!("expected an edge statement");
        }
        assert!(matches!(&g[0].list.list[1], Stmt::Node(n) if n.id.name.value == "n"));
    }

    #[test]
    fn parse_subgraph_operands() {
        let g = parse("digraph { a -> { b c } -> subgraph s { d } }");
        if let Stmt::Edge(es) = &g[0].list.list[0] {
            assert!(matches!(&es.to[0].0, EdgeOperand::SubGraph(sg) if sg.name.is_none()));
            assert!(matches!(&es.to[1].0, EdgeOperand::SubGraph(sg) if sg.name.is_some()));
        } else {
            panic!("expected an edge statement");
        }
    }

    #[test]
    fn parse_attributes() {
        let g = parse(
            "graph { rankdir=LR; node [shape=box, color=\"red\"][style=filled]; a [label=<<b>x</b>>] }",
        );
        let stmts = &g[0].list.list;
        assert_eq!(stmts.len(), 3);
        if let Stmt::Attribute(att) = &stmts[0] {
            assert_eq!(att.target, ast::AttrStmtTarget::Graph);
            assert_eq!(att.list.list[0].0, "rankdir");
        } else {
            panic!("expected an assignment");
        }
        if let Stmt::Attribute(att) = &stmts[1] {
            assert_eq!(att.target, ast::AttrStmtTarget::Node);
            assert_eq!(att.list.list.len(), 3);
        } else {
            panic!("expected an attribute statement");
        }
        if let Stmt::Node(ns) = &stmts[2] {
            assert!(ns.list.list[0].1.is_html());
        } else {
            panic!("expected a node statement");
        }
    }

    #[test]
    fn parse_multiple_graphs() {
        let g = parse("graph a { x } digraph b { y -> z }");
        assert_eq!(g.len(), 2);
        assert!(g[1].directed);
    }

    #[test]
    fn parse_strict() {
        let g = parse("strict digraph { a -> b }");
        assert!(g[0].strict);
    }

    #[test]
    fn parse_program_fail() {
        let err = parse_err("graph { } s");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 11);
    }

    #[test]
    fn parse_unterminated() {
        let err = parse_err("graph Sample{");
        assert!(err.message.contains("'}'"), "{}", err.message);
    }

    #[test]
    fn parse_wrong_edge_op() {
        let err = parse_err("graph {\n a -> b }");
        assert_eq!((err.line, err.column), (2, 4));
        let err = parse_err("digraph { a -- b }");
        assert!(err.message.contains("directed"));
    }

    #[test]
    fn parse_empty_input() {
        parse_err("  // nothing here\n");
    }
}
