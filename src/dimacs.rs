use std::fs;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, line_ending, multispace0, not_line_ending, space0, space1};
use nom::combinator::{map_res, opt};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};

use crate::error::InputError;


/// reads an instance from file, returns (n,m,edges) (WARNING: vertex ids start at 1)
pub fn read_from_file(filename:&str) -> Result<(usize, usize, Vec<(usize,usize)>), InputError> {
    let s = fs::read_to_string(filename)?;
    read_from_str(&s)
}

/// reads an instance from its textual content, returns (n,m,edges)
pub fn read_from_str(content:&str) -> Result<(usize, usize, Vec<(usize,usize)>), InputError> {
    let content = content.replace('\r', "");
    let (remaining, (n,m)) = preceded(skip_comments, preceded(multispace0, read_header))(content.as_str())
        .map_err(|e| InputError::Dimacs(format!("unable to read header: {}", e)))?;
    let mut edges = Vec::with_capacity(m);
    let mut s = remaining;
    while let Ok((tmp,(a,b))) = preceded(skip_comments, preceded(multispace0, read_edge))(s) {
        if a == 0 || b == 0 || a > n || b > n {
            return Err(InputError::Dimacs(format!("edge ({} {}) out of range 1..={}", a, b, n)));
        }
        edges.push((a,b));
        s = tmp;
    }
    // trailing comments and blank lines are allowed, anything else is not
    if let Ok((tmp, _)) = skip_comments(s) { s = tmp; }
    if let Some(line) = s.lines().map(str::trim).find(|l| !l.is_empty()) {
        return Err(InputError::Dimacs(format!("unexpected line: {}", line)));
    }
    // some generators count each edge twice
    if edges.len() != m && 2*edges.len() != m {
        log::warn!("DIMACS header announces {} edges, {} read", m, edges.len());
    }
    Ok((n, m, edges))
}

/// skips a single comment
fn skip_comment(s:&str) -> IResult<&str, &str> {
    delimited(char('c'), not_line_ending, opt(line_ending))(s)
}

/// skips all comments (and the blank lines around them)
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    many0(preceded(multispace0, skip_comment))(s)
}

/// reads a non negative integer
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(s)
}

/// reads two numbers separated by spaces (and the end of the line)
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    terminated(
        separated_pair(read_integer, space1, read_integer),
        pair(space0, opt(line_ending))
    )(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        pair(alt((tag("p edge"), tag("p col"))), space1),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(pair(char('e'), space1), read_two_integers)(s)
}
