//! Sample content shared by the extractor tests

use super::{ContentParser, Profile, Rule, Variable};

/// A trimmed-down ComplianceAsCode benchmark
pub(crate) const SAMPLE_BENCHMARK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xccdf-1.2:Benchmark xmlns:xccdf-1.2="http://checklists.nist.gov/xccdf/1.2" xmlns:html="http://www.w3.org/1999/xhtml" id="xccdf_org.ssgproject.content_benchmark_OCP-4">
  <xccdf-1.2:title>Guide to the Secure Configuration of Red Hat OpenShift Container Platform 4</xccdf-1.2:title>
  <xccdf-1.2:Profile id="xccdf_org.ssgproject.content_profile_moderate">
    <xccdf-1.2:title xml:lang="en-US">NIST 800-53 Moderate-Impact Baseline</xccdf-1.2:title>
    <xccdf-1.2:description xml:lang="en-US">This compliance profile reflects the core set of Moderate-Impact Baseline configuration settings.</xccdf-1.2:description>
    <xccdf-1.2:select idref="xccdf_org.ssgproject.content_rule_api_server_audit_log_maxsize" selected="true"/>
    <xccdf-1.2:select idref="xccdf_org.ssgproject.content_rule_sshd_disable_root_login" selected="false"/>
    <xccdf-1.2:select idref="" selected="true"/>
    <xccdf-1.2:select idref="xccdf_org.ssgproject.content_rule_sshd_set_keepalive" selected="true"/>
    <xccdf-1.2:set-value idref="xccdf_org.ssgproject.content_value_var_sshd_priv_separation">yes</xccdf-1.2:set-value>
    <xccdf-1.2:set-value idref="">ignored</xccdf-1.2:set-value>
  </xccdf-1.2:Profile>
  <xccdf-1.2:Profile id="xccdf_org.ssgproject.content_profile_e8">
    <xccdf-1.2:title xml:lang="en-US">Australian Cyber Security Centre (ACSC) Essential Eight</xccdf-1.2:title>
    <xccdf-1.2:description xml:lang="en-US">This profile contains configuration checks for the Essential Eight.</xccdf-1.2:description>
  </xccdf-1.2:Profile>
  <xccdf-1.2:Group id="xccdf_org.ssgproject.content_group_api-server">
    <xccdf-1.2:title>API Server</xccdf-1.2:title>
    <xccdf-1.2:Value id="xccdf_org.ssgproject.content_value_var_sshd_priv_separation" type="string">
      <xccdf-1.2:title>SSH Privilege Separation Setting</xccdf-1.2:title>
      <xccdf-1.2:description>Specify whether and how sshd separates privileges when handling incoming network connections.</xccdf-1.2:description>
      <xccdf-1.2:value selector="no">no</xccdf-1.2:value>
      <xccdf-1.2:value selector="yes">yes</xccdf-1.2:value>
      <xccdf-1.2:value selector="sandbox">sandbox</xccdf-1.2:value>
      <xccdf-1.2:value>sandbox</xccdf-1.2:value>
    </xccdf-1.2:Value>
    <xccdf-1.2:Value id="xccdf_org.ssgproject.content_value_var_multiple_defaults" type="number">
      <xccdf-1.2:title>Broken Value</xccdf-1.2:title>
      <xccdf-1.2:value>1</xccdf-1.2:value>
      <xccdf-1.2:value>2</xccdf-1.2:value>
    </xccdf-1.2:Value>
    <xccdf-1.2:Value id="xccdf_org.ssgproject.content_value_conditional_function" hidden="true">
      <xccdf-1.2:title>Internal function</xccdf-1.2:title>
      <xccdf-1.2:value>x</xccdf-1.2:value>
      <xccdf-1.2:value>y</xccdf-1.2:value>
    </xccdf-1.2:Value>
    <xccdf-1.2:Value id="xccdf_org.ssgproject.content_value_var_sshd_max_sessions" type="number">
      <xccdf-1.2:title>SSH Max Sessions Count</xccdf-1.2:title>
      <xccdf-1.2:description>Specify the maximum number of open sessions permitted from a <html:code>sshd</html:code> network connection.</xccdf-1.2:description>
      <xccdf-1.2:value>10</xccdf-1.2:value>
    </xccdf-1.2:Value>
    <xccdf-1.2:Value id="xccdf_org.ssgproject.content_value_var_enable_feature" type="boolean">
      <xccdf-1.2:title>Enable Feature</xccdf-1.2:title>
      <xccdf-1.2:value selector="on">true</xccdf-1.2:value>
      <xccdf-1.2:value selector="off">false</xccdf-1.2:value>
    </xccdf-1.2:Value>
    <xccdf-1.2:Rule id="xccdf_org.ssgproject.content_rule_api_server_audit_log_maxsize" selected="false" severity="medium">
      <xccdf-1.2:title>Configure Kubernetes API Server Maximum Audit Log Size</xccdf-1.2:title>
      <xccdf-1.2:description>To rotate audit logs upon reaching a maximum size, set
      <html:code>maximumFileSizeMegabytes</html:code> in the
      <html:code>openshift-kube-apiserver</html:code> configmap.</xccdf-1.2:description>
      <xccdf-1.2:rationale>OpenShift automatically rotates the log files.</xccdf-1.2:rationale>
      <xccdf-1.2:warning>This rule's check operates on the cluster configuration dump.</xccdf-1.2:warning>
      <xccdf-1.2:reference href="http://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-53r4.pdf">CM-6</xccdf-1.2:reference>
      <xccdf-1.2:reference href="https://www.cisecurity.org/benchmark/kubernetes/">1.2.25</xccdf-1.2:reference>
      <xccdf-1.2:reference href="http://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-53r4.pdf">AU-9</xccdf-1.2:reference>
      <xccdf-1.2:reference href="http://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-53r4.pdf">CM-6</xccdf-1.2:reference>
      <xccdf-1.2:fix system="urn:xccdf:fix:script:sh" platform="cpe:/a:redhat:openshift_container_platform:4">sed -i 's/x/y/' /etc/config</xccdf-1.2:fix>
      <xccdf-1.2:fix system="urn:xccdf:fix:script:kubernetes" platform="cpe:/a:redhat:openshift_container_platform:4" disruption="low">---
apiVersion: v1
kind: ConfigMap
metadata:
  name: config
  namespace: openshift-kube-apiserver
data:
  maximumFileSizeMegabytes: "100"
</xccdf-1.2:fix>
      <xccdf-1.2:fix system="urn:xccdf:fix:script:kubernetes" platform="cpe:/a:redhat:openshift_container_platform:4" disruption="high">---
apiVersion: v1
kind: Secret
</xccdf-1.2:fix>
      <xccdf-1.2:fix system="urn:xccdf:fix:script:ignition" platform="cpe:/o:redhat:enterprise_linux_coreos:4" disruption="medium">echo this is not an object</xccdf-1.2:fix>
    </xccdf-1.2:Rule>
    <xccdf-1.2:Rule id="xccdf_org.ssgproject.content_rule_sshd_disable_root_login" selected="false">
      <xccdf-1.2:title>Disable SSH Root Login</xccdf-1.2:title>
      <xccdf-1.2:severity>high</xccdf-1.2:severity>
    </xccdf-1.2:Rule>
    <xccdf-1.2:Rule id="xccdf_org.ssgproject.content_rule_sshd_set_keepalive" selected="false">
      <xccdf-1.2:title>Set SSH Client Alive Count Max</xccdf-1.2:title>
      <xccdf-1.2:description>Set <sub idref="xccdf_org.ssgproject.content_value_var_sshd_set_keepalive" use="legacy"/> as the count.</xccdf-1.2:description>
    </xccdf-1.2:Rule>
  </xccdf-1.2:Group>
</xccdf-1.2:Benchmark>
"#;

/// Run the profile pass with a collecting sink
pub(crate) fn collect_profiles(parser: &ContentParser<'_>, xml: &str) -> super::Result<Vec<Profile>> {
    let doc = crate::xccdf::ContentDocument::parse(xml)?;
    let mut profiles = Vec::new();
    parser.parse_profiles(&doc, |p| {
        profiles.push(p);
        Ok(())
    })?;
    Ok(profiles)
}

/// Run the rule pass with a collecting sink
pub(crate) fn collect_rules(parser: &ContentParser<'_>, xml: &str) -> super::Result<Vec<Rule>> {
    let doc = crate::xccdf::ContentDocument::parse(xml)?;
    let mut rules = Vec::new();
    parser.parse_rules(&doc, |r| {
        rules.push(r);
        Ok(())
    })?;
    Ok(rules)
}

/// Run the variable pass with a collecting sink
pub(crate) fn collect_variables(parser: &ContentParser<'_>, xml: &str) -> super::Result<Vec<Variable>> {
    let doc = crate::xccdf::ContentDocument::parse(xml)?;
    let mut variables = Vec::new();
    parser.parse_variables(&doc, |v| {
        variables.push(v);
        Ok(())
    })?;
    Ok(variables)
}
